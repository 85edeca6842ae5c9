// src/services/channel.rs

//! Channel name and icon lookup through the YouTube Data API.

use reqwest::{Client, StatusCode};

use crate::error::Result;
use crate::models::{ChannelInfo, ChannelListResponse};
use crate::utils::endpoint;

/// Resolves a channel ID to its display identity.
#[derive(Debug, Clone)]
pub struct ChannelResolver {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl ChannelResolver {
    pub fn new(client: Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            api_key,
        }
    }

    /// Resolve `channel_id`, falling back to [`ChannelInfo::unknown`].
    ///
    /// Never fails: a missing key, a transport error, a non-200 status or an
    /// empty result all produce the placeholder identity.
    pub async fn resolve(&self, channel_id: &str) -> ChannelInfo {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            log::warn!("No API key configured; channel name and icon are unavailable");
            return ChannelInfo::unknown();
        };

        match self.lookup(channel_id, api_key).await {
            Ok(Some(info)) => {
                log::info!("Resolved channel {} as '{}'", channel_id, info.name);
                info
            }
            Ok(None) => {
                log::warn!("Channel {} not found by the Data API", channel_id);
                ChannelInfo::unknown()
            }
            Err(e) => {
                log::warn!("Channel lookup for {} failed: {}", channel_id, e);
                ChannelInfo::unknown()
            }
        }
    }

    async fn lookup(&self, channel_id: &str, api_key: &str) -> Result<Option<ChannelInfo>> {
        let url = endpoint(
            &self.api_base,
            "channels",
            &[("part", "snippet"), ("id", channel_id), ("key", api_key)],
        )?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("Channel lookup returned status {}", status.as_u16());
            return Ok(None);
        }

        let body: ChannelListResponse = serde_json::from_str(&response.text().await?)?;
        let info = body
            .items
            .into_iter()
            .next()
            .and_then(|item| item.snippet)
            .map(|snippet| ChannelInfo {
                name: snippet
                    .title
                    .unwrap_or_else(|| crate::models::UNKNOWN_CHANNEL.to_string()),
                icon_url: snippet
                    .thumbnails
                    .default
                    .and_then(|thumb| thumb.url)
                    .unwrap_or_default(),
            });
        Ok(info)
    }
}
