//! Rate-limit retry policy for webhook delivery.
//!
//! The policy does no I/O. The notifier asks it after every 429 response
//! whether another attempt is allowed and how long to wait first.

use std::time::Duration;

use crate::models::WebhookConfig;

/// Bounded retry with server-directed backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait, in time units, when the server gives no hint
    pub default_retry_after: f64,
    /// Length of one `retry_after` unit (one second against Discord)
    pub time_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            default_retry_after: 1.0,
            time_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Build the policy described by the webhook configuration.
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            default_retry_after: config.default_retry_after_secs,
            ..Self::default()
        }
    }

    /// Scale every wait by `unit` instead of one second.
    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.time_unit = unit;
        self
    }

    /// Wait before attempt `attempt + 1`, or `None` when `attempt` was the last.
    ///
    /// `attempt` is 1-based. Negative or non-finite hints count as zero.
    pub fn next_delay(&self, attempt: u32, retry_after: Option<f64>) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let units = retry_after.unwrap_or(self.default_retry_after);
        let units = if units.is_finite() { units.max(0.0) } else { 0.0 };
        Some(self.time_unit.mul_f64(units))
    }
}
