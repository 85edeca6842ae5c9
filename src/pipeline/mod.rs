//! Pipeline stages and the batch driver.
//!
//! - `extract`: raw post → content record
//! - `select`: limit and chronological ordering
//! - `retry`: webhook rate-limit policy
//! - `relay`: the run itself

pub mod extract;
pub mod relay;
pub mod retry;
pub mod select;

pub use extract::{extract_content, extract_content_with};
pub use relay::{Relay, prepare_posted_log, run_relay, seed_posted_log};
pub use retry::RetryPolicy;
pub use select::{PostLimit, select_posts};
