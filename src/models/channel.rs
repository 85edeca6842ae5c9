//! Channel identity shown as the embed author.

use serde::{Deserialize, Serialize};

/// Display name used when the channel lookup fails.
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";

/// Resolved channel name and icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: String,
    pub icon_url: String,
}

impl ChannelInfo {
    /// Placeholder identity for an unresolved channel.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_CHANNEL.to_string(),
            icon_url: String::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_CHANNEL && self.icon_url.is_empty()
    }
}

impl Default for ChannelInfo {
    fn default() -> Self {
        Self::unknown()
    }
}
