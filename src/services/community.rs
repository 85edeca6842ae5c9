// src/services/community.rs

//! Community feed fetcher.
//!
//! Talks to a YouTube-operational-API instance, which exposes the community
//! tab that the official Data API does not.

use reqwest::{Client, StatusCode};

use crate::error::Result;
use crate::models::CommunityFeed;
use crate::utils::{endpoint, http::body_snippet};

/// Fetches the raw community feed of a channel.
#[derive(Debug, Clone)]
pub struct CommunityFetcher {
    client: Client,
    api_base: String,
}

impl CommunityFetcher {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Fetch the feed for `channel_id`.
    ///
    /// Any status other than 200 is logged and yields `Ok(None)`. Transport
    /// and decoding failures are returned as errors. Nothing is retried.
    pub async fn fetch(&self, channel_id: &str) -> Result<Option<CommunityFeed>> {
        let url = endpoint(
            &self.api_base,
            "channels",
            &[("part", "community"), ("id", channel_id)],
        )?;

        log::debug!("Fetching community feed: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!(
                "Failed to fetch community feed: {} {}",
                status.as_u16(),
                body_snippet(response).await
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let feed: CommunityFeed = serde_json::from_str(&body)?;
        Ok(Some(feed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn query(channel_id: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("part".into(), "community".into()),
            Matcher::UrlEncoded("id".into(), channel_id.into()),
        ])
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_query(query("UC123"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "items": [{"community": [{"id": "a"}, {"id": "b"}]}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let fetcher = CommunityFetcher::new(Client::new(), server.url());
        let feed = fetcher.fetch("UC123").await.unwrap().unwrap();

        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].posts().len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream unavailable")
            .expect(1)
            .create_async()
            .await;

        let fetcher = CommunityFetcher::new(Client::new(), server.url());
        assert!(fetcher.fetch("UC123").await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let fetcher = CommunityFetcher::new(Client::new(), server.url());
        assert!(fetcher.fetch("UC123").await.is_err());
    }
}
