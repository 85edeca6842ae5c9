// src/pipeline/relay.rs

//! Batch driver: fetch → extract → dedup → announce.

use chrono::Utc;
use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, Mention, RunSummary, UnidentifiedKey};
use crate::pipeline::{PostLimit, RetryPolicy, extract_content_with, select_posts};
use crate::services::{ChannelResolver, CommunityFetcher, WebhookNotifier, fetch_ignore_list};
use crate::storage::{FilePostedLog, PostedLog};
use crate::utils::{channel_url, report};

/// One configured relay from a channel to a webhook.
#[derive(Debug, Clone)]
pub struct Relay {
    channel_id: String,
    max_posts: i64,
    mention: Mention,
    unidentified_key: UnidentifiedKey,
    fetcher: CommunityFetcher,
    resolver: ChannelResolver,
    notifier: WebhookNotifier,
}

impl Relay {
    /// Wire up the services described by `config`.
    pub fn from_config(config: &Config, client: &Client) -> Self {
        let notifier = WebhookNotifier::new(client.clone(), config.webhook.url.clone())
            .with_color(config.webhook.embed_color)
            .with_retry(RetryPolicy::from_config(&config.webhook));

        Self {
            channel_id: config.source.channel_id.clone(),
            max_posts: config.source.max_posts,
            mention: config.webhook.mention,
            unidentified_key: config.storage.unidentified_key,
            fetcher: CommunityFetcher::new(client.clone(), config.http.community_api_base.clone()),
            resolver: ChannelResolver::new(
                client.clone(),
                config.http.data_api_base.clone(),
                config.source.api_key.clone(),
            ),
            notifier,
        }
    }

    /// Replace the webhook retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.notifier = self.notifier.with_retry(retry);
        self
    }

    /// Announce every selected post that is not in `posted` yet.
    ///
    /// Remote failures are logged and end the run early with what was done
    /// so far. The only error returned is a failure to record a sent post.
    pub async fn run(&self, posted: &mut dyn PostedLog) -> Result<RunSummary> {
        let mut summary = RunSummary::new(Utc::now());
        report::header("Community relay");
        log::info!(
            "Run started at {}",
            summary.started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let limit = match PostLimit::from_config(self.max_posts) {
            Ok(limit) => limit,
            Err(e) => {
                log::error!("{}; nothing will be sent", e);
                return Ok(self.finish(summary));
            }
        };

        let fallback_url = channel_url(&self.channel_id);
        let channel = self.resolver.resolve(&self.channel_id).await;

        let feed = match self.fetcher.fetch(&self.channel_id).await {
            Ok(Some(feed)) => feed,
            Ok(None) => {
                log::warn!("No community feed for {}; nothing to do", self.channel_id);
                return Ok(self.finish(summary));
            }
            Err(e) => {
                log::error!("Fetching community feed for {} failed: {}", self.channel_id, e);
                return Ok(self.finish(summary));
            }
        };

        for item in &feed.items {
            let posts = item.posts();
            let total = posts.len();
            let selected = select_posts(posts, limit);

            summary.available += total;
            summary.selected += selected.len();
            log::info!(
                "Sending {}/{} most recent community posts to webhook",
                selected.len(),
                total
            );

            for post in &selected {
                let content = extract_content_with(post, &fallback_url, self.unidentified_key);

                if posted.is_posted(&content.url) {
                    log::info!("{} already posted", content.url);
                    summary.already_posted += 1;
                    continue;
                }

                match self.notifier.send(&channel, &content, self.mention).await {
                    Ok(status) if status.is_success() => {
                        posted.mark_posted(&content.url).await?;
                        summary.sent += 1;
                        log::info!(
                            "{} posted with status code: {}",
                            content.url,
                            status.as_u16()
                        );
                    }
                    Ok(status) => {
                        summary.failed += 1;
                        log::warn!(
                            "{} not posted (status code: {}); will retry next run",
                            content.url,
                            status.as_u16()
                        );
                    }
                    Err(e) => {
                        summary.failed += 1;
                        log::error!("{} not posted: {}", content.url, e);
                    }
                }
            }
        }

        Ok(self.finish(summary))
    }

    fn finish(&self, summary: RunSummary) -> RunSummary {
        let summary = summary.finish();
        report::summary(&format!("Channel {}", self.channel_id), &summary.items());
        summary
    }
}

/// Run one relay pass with the configured services.
pub async fn run_relay(
    config: &Config,
    client: &Client,
    posted: &mut dyn PostedLog,
) -> Result<RunSummary> {
    Relay::from_config(config, client).run(posted).await
}

/// Seed the dedup log from the ignore list when the log does not exist yet.
///
/// Returns whether a log file was written.
pub async fn seed_posted_log(config: &Config, client: &Client) -> Result<bool> {
    let path = &config.storage.posted_log;
    if tokio::fs::try_exists(path).await? {
        log::debug!("Posted log {} exists; not seeding", path.display());
        return Ok(false);
    }

    let Some(list_url) = config.storage.ignore_list_url.as_deref() else {
        log::info!("Ignore list URL not provided. Skipping initialization.");
        return Ok(false);
    };

    let urls = fetch_ignore_list(client, list_url).await;
    if urls.is_empty() {
        log::warn!("Ignore list is empty; posted log not initialized");
        return Ok(false);
    }
    FilePostedLog::initialize(path, &urls).await
}

/// Seed the dedup log if needed, then load it.
pub async fn prepare_posted_log(config: &Config, client: &Client) -> Result<FilePostedLog> {
    seed_posted_log(config, client).await?;
    FilePostedLog::load(&config.storage.posted_log).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_log(tmp: &TempDir) -> Config {
        let mut config = Config::default();
        config.source.channel_id = "UC123".to_string();
        config.webhook.url = "http://127.0.0.1:9/hook".to_string();
        config.storage.posted_log = tmp.path().join("data/posted_urls.log");
        config
    }

    #[tokio::test]
    async fn test_negative_limit_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_with_log(&tmp);
        config.source.max_posts = -1;
        config.http.community_api_base = "http://127.0.0.1:9".to_string();

        let mut posted = FilePostedLog::load(&config.storage.posted_log).await.unwrap();
        let summary = run_relay(&config, &Client::new(), &mut posted).await.unwrap();

        assert_eq!(summary.available, 0);
        assert_eq!(summary.sent, 0);
        assert!(posted.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_feed_completes() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_with_log(&tmp);
        config.http.community_api_base = "http://127.0.0.1:9".to_string();

        let mut posted = FilePostedLog::load(&config.storage.posted_log).await.unwrap();
        let summary = run_relay(&config, &Client::new(), &mut posted).await.unwrap();

        assert_eq!(summary.selected, 0);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_seed_skipped_without_list_url() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_log(&tmp);

        assert!(!seed_posted_log(&config, &Client::new()).await.unwrap());
        assert!(!config.storage.posted_log.exists());
    }

    #[tokio::test]
    async fn test_prepare_seeds_from_ignore_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ignore.txt")
            .with_status(200)
            .with_body("https://www.youtube.com/post/old\nhttps://example.com/x\n")
            .expect(1)
            .create_async()
            .await;

        let tmp = TempDir::new().unwrap();
        let mut config = config_with_log(&tmp);
        config.storage.ignore_list_url = Some(format!("{}/ignore.txt", server.url()));

        let posted = prepare_posted_log(&config, &Client::new()).await.unwrap();
        assert_eq!(posted.len(), 1);
        assert!(posted.is_posted("https://www.youtube.com/post/old"));

        // An existing log is never re-seeded.
        let again = prepare_posted_log(&config, &Client::new()).await.unwrap();
        assert_eq!(again.len(), 1);
        mock.assert_async().await;
    }
}
