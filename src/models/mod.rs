// src/models/mod.rs

//! Domain models for the relay.
//!
//! This module contains the data structures passed between pipeline stages,
//! organized by their primary purpose.

mod channel;
mod config;
mod content;
mod post;
mod summary;

// Re-export all public types
pub use channel::{ChannelInfo, UNKNOWN_CHANNEL};
pub use config::{
    Config, HttpConfig, Mention, SourceConfig, StorageConfig, UnidentifiedKey, WebhookConfig,
};
pub use content::{ContentRecord, POST_TITLE, UNKNOWN_DATE};
pub use post::{
    ChannelItem, ChannelListResponse, ChannelSnippet, CommunityFeed, FeedItem, PostImage,
    RawPost, SnippetThumbnails, TextFragment, Thumbnail,
};
pub use summary::RunSummary;
