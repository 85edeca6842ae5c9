//! Normalized post content.

use serde::{Deserialize, Serialize};

/// Title used for every announcement embed.
pub const POST_TITLE: &str = "YouTube Community Post";

/// Publish date used when the API omits one.
pub const UNKNOWN_DATE: &str = "Unknown";

/// A community post flattened for announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentRecord {
    /// Concatenated post text, trimmed
    pub text: String,

    /// Largest thumbnail of the first image, or empty
    pub image_url: String,

    /// Publish date as served by the API
    pub published_at: String,

    /// Embed title
    pub title: String,

    /// Canonical URL, also the dedup key
    pub url: String,
}
