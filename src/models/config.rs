//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Channel being monitored
    #[serde(default)]
    pub source: SourceConfig,

    /// Notification target
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Dedup log settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP client and remote API settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is expected when everything comes from the
    /// environment; any other failure is reported as a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}; using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path,
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from environment-style variables.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Empty values are
    /// treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CHANNEL_ID") {
            self.source.channel_id = v;
        }
        if let Some(v) = get("API_KEY") {
            self.source.api_key = Some(v);
        }
        if let Some(v) = get("MAX_POSTS") {
            self.source.max_posts = v
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("MAX_POSTS={v:?}: {e}")))?;
        }
        if let Some(v) = get("WEBHOOK_URL") {
            self.webhook.url = v;
        }
        if let Some(v) = get("MENTION") {
            self.webhook.mention = v.parse()?;
        }
        if let Some(v) = get("POST_IGNORELIST_URL") {
            self.storage.ignore_list_url = Some(v);
        }
        Ok(())
    }

    /// Validate configuration values for basic sanity.
    ///
    /// `source.max_posts` is not checked here. A negative limit is reported
    /// by the relay and the run sends nothing.
    pub fn validate(&self) -> Result<()> {
        if self.source.channel_id.trim().is_empty() {
            return Err(AppError::validation("source.channel_id is empty"));
        }
        if self.webhook.url.trim().is_empty() {
            return Err(AppError::validation("webhook.url is empty"));
        }
        if self.webhook.max_attempts == 0 {
            return Err(AppError::validation("webhook.max_attempts must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// The monitored channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// YouTube channel ID
    #[serde(default)]
    pub channel_id: String,

    /// YouTube Data API key used for the channel name and icon
    #[serde(default)]
    pub api_key: Option<String>,

    /// Number of most recent posts to consider; 0 for all
    #[serde(default = "defaults::max_posts")]
    pub max_posts: i64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            api_key: None,
            max_posts: defaults::max_posts(),
        }
    }
}

/// Webhook target and delivery behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Discord webhook URL
    #[serde(default)]
    pub url: String,

    /// Group tagged in the leading content line
    #[serde(default)]
    pub mention: Mention,

    /// Embed side bar color
    #[serde(default = "defaults::embed_color")]
    pub embed_color: u32,

    /// Total attempts per post when rate limited
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Wait used when a 429 response carries no retry hint
    #[serde(default = "defaults::default_retry_after_secs")]
    pub default_retry_after_secs: f64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            mention: Mention::default(),
            embed_color: defaults::embed_color(),
            max_attempts: defaults::max_attempts(),
            default_retry_after_secs: defaults::default_retry_after_secs(),
        }
    }
}

/// Dedup log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Newline-delimited log of announced post URLs
    #[serde(default = "defaults::posted_log")]
    pub posted_log: PathBuf,

    /// List of post URLs to treat as already announced on first run
    #[serde(default)]
    pub ignore_list_url: Option<String>,

    /// Dedup key for posts without an identifier
    #[serde(default)]
    pub unidentified_key: UnidentifiedKey,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            posted_log: defaults::posted_log(),
            ignore_list_url: None,
            unidentified_key: UnidentifiedKey::default(),
        }
    }
}

/// HTTP client and remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Base URL of a YouTube-operational-API instance
    #[serde(default = "defaults::community_api_base")]
    pub community_api_base: String,

    /// Base URL of the YouTube Data API v3
    #[serde(default = "defaults::data_api_base")]
    pub data_api_base: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            community_api_base: defaults::community_api_base(),
            data_api_base: defaults::data_api_base(),
        }
    }
}

/// Mention prefixed to the announcement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mention {
    #[default]
    None,
    Everyone,
    Here,
}

impl Mention {
    /// Token as it appears after `@`, or `None` when nobody is tagged.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Mention::None => None,
            Mention::Everyone => Some("everyone"),
            Mention::Here => Some("here"),
        }
    }
}

impl FromStr for Mention {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Mention::None),
            "everyone" => Ok(Mention::Everyone),
            "here" => Ok(Mention::Here),
            other => Err(AppError::config(format!(
                "Unknown mention '{other}' (expected none, everyone or here)"
            ))),
        }
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("none"))
    }
}

/// How posts without an identifier are keyed in the dedup log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnidentifiedKey {
    /// Use the channel URL; every unidentified post shares one key
    #[default]
    ChannelUrl,
    /// Channel URL plus a content fingerprint fragment
    Fingerprint,
}

mod defaults {
    use std::path::PathBuf;

    pub fn max_posts() -> i64 {
        10
    }

    pub fn embed_color() -> u32 {
        16711680
    }
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn default_retry_after_secs() -> f64 {
        1.0
    }

    pub fn posted_log() -> PathBuf {
        PathBuf::from("data/posted_urls.log")
    }

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; community-webhook/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn community_api_base() -> String {
        "https://yt.lemnoslife.com".into()
    }
    pub fn data_api_base() -> String {
        "https://www.googleapis.com/youtube/v3".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.source.channel_id = "UCE6acMV3m35znLcf0JGNn7Q".to_string();
        config.webhook.url = "https://discord.com/api/webhooks/1/abc".to_string();
        config
    }

    #[test]
    fn load_or_default_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[source]\nchannel_id = \"UCfile\"\nmax_posts = 3\n\n[webhook]\nmention = \"here\"\n",
        )
        .unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.source.channel_id, "UCfile");
        assert_eq!(config.source.max_posts, 3);
        assert_eq!(config.webhook.mention, Mention::Here);
        assert_eq!(config.webhook.max_attempts, 3);
    }

    #[test]
    fn load_or_default_falls_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        let broken = tmp.path().join("broken.toml");
        std::fs::write(&broken, "[source\nchannel_id = ").unwrap();

        for path in [missing, broken] {
            let config = Config::load_or_default(&path);
            assert!(config.source.channel_id.is_empty(), "{}", path.display());
            assert_eq!(config.source.max_posts, 10);
        }
        assert!(Config::load(tmp.path().join("broken.toml")).is_err());
    }

    #[test]
    fn validate_valid_config_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_default_config() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_webhook() {
        let mut config = valid_config();
        config.webhook.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_negative_limit() {
        let mut config = valid_config();
        config.source.max_posts = -3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            channel_id = "UC123"

            [webhook]
            url = "https://example.com/hook"
            mention = "here"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.channel_id, "UC123");
        assert_eq!(config.source.max_posts, 10);
        assert_eq!(config.webhook.mention, Mention::Here);
        assert_eq!(config.webhook.max_attempts, 3);
        assert_eq!(config.storage.unidentified_key, UnidentifiedKey::ChannelUrl);
        assert_eq!(config.http.data_api_base, "https://www.googleapis.com/youtube/v3");
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CHANNEL_ID", "UCenv"),
            ("MAX_POSTS", "0"),
            ("MENTION", "everyone"),
            ("WEBHOOK_URL", "https://example.com/env"),
            ("POST_IGNORELIST_URL", ""),
        ]);
        let mut config = valid_config();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.source.channel_id, "UCenv");
        assert_eq!(config.source.max_posts, 0);
        assert_eq!(config.webhook.mention, Mention::Everyone);
        assert_eq!(config.webhook.url, "https://example.com/env");
        assert!(config.storage.ignore_list_url.is_none());
    }

    #[test]
    fn env_override_rejects_bad_number() {
        let mut config = valid_config();
        let result = config.apply_env(|key| (key == "MAX_POSTS").then(|| "ten".to_string()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn mention_parsing() {
        assert_eq!("None".parse::<Mention>().unwrap(), Mention::None);
        assert_eq!(" here ".parse::<Mention>().unwrap(), Mention::Here);
        assert!("moderators".parse::<Mention>().is_err());
        assert_eq!(Mention::Everyone.token(), Some("everyone"));
        assert_eq!(Mention::None.token(), None);
    }
}
