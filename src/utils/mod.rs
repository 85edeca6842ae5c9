//! Utility functions and helpers.

pub mod http;
pub mod report;

use url::Url;

use crate::error::Result;

/// Public URL of a channel, used as the fallback dedup key.
pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

/// Public URL of a community post.
pub fn post_url(post_id: &str) -> String {
    format!("https://www.youtube.com/post/{post_id}")
}

/// Build `{base}/{path}` with encoded query parameters.
pub fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse_with_params(&raw, params)?)
}

/// Whether a line from an ignore list points at YouTube.
pub fn is_youtube_url(line: &str) -> bool {
    line.contains("youtube.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_urls() {
        assert_eq!(post_url("abc"), "https://www.youtube.com/post/abc");
        assert_eq!(
            channel_url("UC123"),
            "https://www.youtube.com/channel/UC123"
        );
    }

    #[test]
    fn test_endpoint_encodes_params() {
        let url = endpoint(
            "https://yt.example.com/",
            "/channels",
            &[("part", "community"), ("id", "UC a&b")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://yt.example.com/channels?part=community&id=UC+a%26b"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint(
            "https://www.googleapis.com/youtube/v3",
            "channels",
            &[("part", "snippet")],
        )
        .unwrap();
        assert_eq!(url.path(), "/youtube/v3/channels");
    }

    #[test]
    fn test_endpoint_rejects_bad_base() {
        assert!(endpoint("not a url", "channels", &[]).is_err());
    }

    #[test]
    fn test_is_youtube_url() {
        assert!(is_youtube_url("https://www.youtube.com/post/abc"));
        assert!(!is_youtube_url("https://example.com/post/abc"));
    }
}
