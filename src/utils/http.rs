// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::HttpConfig;

/// Create the HTTP client shared by every remote call of a run.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Read a response body for error logs, never failing.
pub async fn body_snippet(response: reqwest::Response) -> String {
    const MAX_CHARS: usize = 500;

    match response.text().await {
        Ok(text) if text.chars().count() > MAX_CHARS => {
            let cut: String = text.chars().take(MAX_CHARS).collect();
            format!("{cut}…")
        }
        Ok(text) => text,
        Err(e) => format!("<unreadable body: {e}>"),
    }
}
