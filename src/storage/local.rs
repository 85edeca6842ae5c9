//! File-backed dedup log.
//!
//! The whole file is read into a set once when the log is opened; lookups
//! never touch the disk and every `mark_posted` appends one line.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::PostedLog;

/// Dedup log stored as a newline-delimited text file.
#[derive(Debug, Clone)]
pub struct FilePostedLog {
    path: PathBuf,
    posted: HashSet<String>,
}

impl FilePostedLog {
    /// Open the log at `path`. A missing file is an empty log.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let posted = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No posted log at {} yet", path.display());
                HashSet::new()
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        log::info!(
            "Loaded {} posted URLs from {}",
            posted.len(),
            path.display()
        );
        Ok(Self { path, posted })
    }

    /// Create the log file at `path` with `urls` as its content.
    ///
    /// Used to seed the log from an ignore list on first run. Returns `false`
    /// without writing when the file already exists.
    pub async fn initialize(path: &Path, urls: &[String]) -> Result<bool> {
        if tokio::fs::try_exists(path).await? {
            return Ok(false);
        }
        ensure_parent(path).await?;

        let mut content = String::new();
        for url in urls {
            content.push_str(url);
            content.push('\n');
        }
        tokio::fs::write(path, content).await?;
        log::info!("Initialized {} with {} URLs", path.display(), urls.len());
        Ok(true)
    }
}

#[async_trait]
impl PostedLog for FilePostedLog {
    fn is_posted(&self, url: &str) -> bool {
        self.posted.contains(url)
    }

    async fn mark_posted(&mut self, url: &str) -> Result<()> {
        ensure_parent(&self.path).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{url}\n").as_bytes()).await?;
        file.flush().await?;

        self.posted.insert(url.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.posted.len()
    }
}

/// Ensure parent directory exists.
async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
