// src/services/webhook.rs

//! Discord webhook notifier.
//!
//! Builds one embed per post and delivers it, waiting out 429 responses as
//! directed by the server for a bounded number of attempts.

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ChannelInfo, ContentRecord, Mention};
use crate::pipeline::RetryPolicy;
use crate::utils::http::body_snippet;

/// Discord rejects embed descriptions longer than this.
const MAX_DESCRIPTION_CHARS: usize = 4096;

/// Text of the leading content line, after the mention.
const ANNOUNCEMENT: &str = "new community post!";

/// Posts announcements to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
    embed_color: u32,
    retry: RetryPolicy,
}

impl WebhookNotifier {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
            embed_color: 16711680,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.embed_color = color;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Announce one post and return the final HTTP status.
    ///
    /// A 429 is retried after the server's `retry_after`; once the policy
    /// runs out of attempts the 429 is returned as is. Other non-2xx statuses
    /// are logged with their body and returned. Only transport failures are
    /// errors.
    pub async fn send(
        &self,
        channel: &ChannelInfo,
        content: &ContentRecord,
        mention: Mention,
    ) -> Result<StatusCode> {
        let payload = WebhookPayload::build(channel, content, mention, self.embed_color);
        log::debug!(
            "Sending data to webhook: {}",
            serde_json::to_string(&payload)?
        );

        let mut attempt: u32 = 1;
        loop {
            let response = self
                .client
                .post(&self.webhook_url)
                .json(&payload)
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_hint(response).await;
                match self.retry.next_delay(attempt, retry_after) {
                    Some(delay) => {
                        log::warn!(
                            "Rate limited by webhook. Retrying after {:.2}s (attempt {}/{}).",
                            delay.as_secs_f64(),
                            attempt + 1,
                            self.retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    None => {
                        log::error!(
                            "Still rate limited after {} attempts; giving up on {}",
                            attempt,
                            content.url
                        );
                        return Ok(status);
                    }
                }
            }

            if !status.is_success() {
                log::error!(
                    "Webhook error: {} {}",
                    status.as_u16(),
                    body_snippet(response).await
                );
            }
            return Ok(status);
        }
    }
}

/// Read the wait hint of a 429 response, in seconds.
///
/// Discord puts `retry_after` in the JSON body; the `Retry-After` header is
/// consulted when the body has none.
async fn retry_after_hint(response: reqwest::Response) -> Option<f64> {
    #[derive(Deserialize)]
    struct RateLimitBody {
        retry_after: Option<f64>,
    }

    let header = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok());

    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<RateLimitBody>(&body)
        .ok()
        .and_then(|b| b.retry_after)
        .or(header)
}

/// Execute-webhook request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub color: u32,
    pub author: EmbedAuthor,
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

impl WebhookPayload {
    /// Build the announcement for one post.
    pub fn build(
        channel: &ChannelInfo,
        content: &ContentRecord,
        mention: Mention,
        color: u32,
    ) -> Self {
        let image = (!content.image_url.is_empty()).then(|| EmbedImage {
            url: content.image_url.clone(),
        });

        Self {
            content: mention
                .token()
                .map(|token| format!("@{token} {ANNOUNCEMENT}")),
            embeds: vec![Embed {
                color,
                author: EmbedAuthor {
                    name: channel.name.clone(),
                    icon_url: channel.icon_url.clone(),
                },
                title: content.title.clone(),
                url: content.url.clone(),
                description: truncate_chars(&content.text, MAX_DESCRIPTION_CHARS),
                image,
                footer: EmbedFooter {
                    text: format!("Published: {}", content.published_at),
                },
            }],
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
