//! Wire types for the community and channel APIs.

use serde::{Deserialize, Deserializer};

/// Decode `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `channels?part=community`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityFeed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<FeedItem>,
}

/// One channel entry of the community feed.
///
/// Posts are kept as raw JSON so a single malformed post cannot fail the
/// whole document; see [`FeedItem::posts`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub community: Vec<serde_json::Value>,
}

impl FeedItem {
    /// Decode the posts of this item, newest first as served.
    ///
    /// Posts that are not objects of the expected shape are skipped.
    pub fn posts(&self) -> Vec<RawPost> {
        self.community
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| match RawPost::deserialize(value) {
                Ok(post) => Some(post),
                Err(e) => {
                    log::warn!("Skipping undecodable community post #{}: {}", idx, e);
                    None
                }
            })
            .collect()
    }
}

/// A community post as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content_text: Vec<TextFragment>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<PostImage>,

    #[serde(default)]
    pub date: Option<String>,
}

/// A run of post text (plain text, link or hashtag).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextFragment {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// An attached image with thumbnails ordered smallest to largest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

/// Response of the Data API `channels?part=snippet`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelItem {
    #[serde(default)]
    pub snippet: Option<ChannelSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnails: SnippetThumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetThumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
}
