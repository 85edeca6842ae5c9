//! Service layer for the relay.
//!
//! This module contains the remote calls of a run:
//! - Community feed fetching (`CommunityFetcher`)
//! - Channel identity lookup (`ChannelResolver`)
//! - Webhook delivery (`WebhookNotifier`)
//! - Ignore list download (`fetch_ignore_list`)

mod channel;
mod community;
mod ignore_list;
mod webhook;

pub use channel::ChannelResolver;
pub use community::CommunityFetcher;
pub use ignore_list::fetch_ignore_list;
pub use webhook::{Embed, EmbedAuthor, EmbedFooter, EmbedImage, WebhookNotifier, WebhookPayload};
