//! Post normalization.
//!
//! Turns a raw community post into the flat record that is announced and
//! used as the dedup key. Pure: no I/O, never fails.

use sha2::{Digest, Sha256};

use crate::models::{ContentRecord, POST_TITLE, RawPost, UNKNOWN_DATE, UnidentifiedKey};
use crate::utils::post_url;

/// Extract a post, keying unidentified posts by the channel URL.
pub fn extract_content(post: &RawPost, channel_url: &str) -> ContentRecord {
    extract_content_with(post, channel_url, UnidentifiedKey::ChannelUrl)
}

/// Extract a post with an explicit key strategy for unidentified posts.
pub fn extract_content_with(
    post: &RawPost,
    channel_url: &str,
    key: UnidentifiedKey,
) -> ContentRecord {
    let text = post
        .content_text
        .iter()
        .filter_map(|fragment| fragment.text.as_deref())
        .collect::<String>()
        .trim()
        .to_string();

    let image_url = post
        .images
        .first()
        .and_then(|image| image.thumbnails.last())
        .and_then(|thumb| thumb.url.clone())
        .unwrap_or_default();

    let published_at = post
        .date
        .clone()
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let url = match post.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => post_url(id),
        None => match key {
            UnidentifiedKey::ChannelUrl => channel_url.to_string(),
            UnidentifiedKey::Fingerprint => format!(
                "{}#{}",
                channel_url,
                fingerprint(&text, &image_url, &published_at)
            ),
        },
    };

    log::debug!("Extracted community post {}", url);

    ContentRecord {
        text,
        image_url,
        published_at,
        title: POST_TITLE.to_string(),
        url,
    }
}

/// Short stable digest of the visible post content.
fn fingerprint(text: &str, image_url: &str, published_at: &str) -> String {
    let mut hasher = Sha256::new();
    for part in [text, image_url, published_at] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}
