// src/services/ignore_list.rs

//! Remote list of post URLs to treat as already announced.

use reqwest::Client;

use crate::error::Result;
use crate::utils::is_youtube_url;

/// Fetch an ignore list and keep only YouTube URLs.
///
/// Failures are logged and produce an empty list.
pub async fn fetch_ignore_list(client: &Client, url: &str) -> Vec<String> {
    match try_fetch(client, url).await {
        Ok(urls) => {
            log::info!("Fetched {} URLs from ignore list", urls.len());
            urls
        }
        Err(e) => {
            log::error!("Error fetching or validating URL list: {}", e);
            Vec::new()
        }
    }
}

async fn try_fetch(client: &Client, url: &str) -> Result<Vec<String>> {
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| is_youtube_url(line))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_filters_to_youtube_urls() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/ignore.txt")
            .with_status(200)
            .with_body(
                "https://www.youtube.com/post/a\n\
                 https://example.com/post/b\n\
                 \n\
                 https://www.youtube.com/post/c\r\n",
            )
            .create_async()
            .await;

        let urls = fetch_ignore_list(&Client::new(), &format!("{}/ignore.txt", server.url())).await;
        assert_eq!(
            urls,
            vec![
                "https://www.youtube.com/post/a".to_string(),
                "https://www.youtube.com/post/c".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_http_error_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/ignore.txt")
            .with_status(404)
            .create_async()
            .await;

        let urls = fetch_ignore_list(&Client::new(), &format!("{}/ignore.txt", server.url())).await;
        assert!(urls.is_empty());
    }
}
