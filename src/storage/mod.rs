//! Dedup log of announced posts.
//!
//! The log is a newline-delimited text file of canonical post URLs. A URL is
//! appended only after its announcement succeeded, so a failed post is retried
//! on the next run.
//!
//! ```text
//! data/
//! └── posted_urls.log
//!     https://www.youtube.com/post/UgkxAbc...
//!     https://www.youtube.com/post/UgkxDef...
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::FilePostedLog;

/// Trait for dedup log backends.
#[async_trait]
pub trait PostedLog: Send + Sync {
    /// Whether the URL was announced by an earlier run.
    fn is_posted(&self, url: &str) -> bool;

    /// Record a successfully announced URL.
    async fn mark_posted(&mut self, url: &str) -> Result<()>;

    /// Number of recorded URLs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
