//! Run statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one relay run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Posts served by the feed
    pub available: usize,
    /// Posts left after applying the limit
    pub selected: usize,
    /// Posts announced with a 2xx response
    pub sent: usize,
    /// Posts skipped because they were already in the dedup log
    pub already_posted: usize,
    /// Posts whose announcement failed
    pub failed: usize,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            available: 0,
            selected: 0,
            sent: 0,
            already_posted: 0,
            failed: 0,
        }
    }

    /// Stamp the end time and return the summary.
    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// Key/value pairs for the end-of-run log.
    pub fn items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Started", self.started_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("Finished", self.finished_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("Available", self.available.to_string()),
            ("Selected", self.selected.to_string()),
            ("Sent", self.sent.to_string()),
            ("Already posted", self.already_posted.to_string()),
            ("Failed", self.failed.to_string()),
        ]
    }
}
