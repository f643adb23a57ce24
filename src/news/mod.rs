//! News collection module
//!
//! Fetches articles from the configured feeds, normalizes each feed's JSON
//! shape into [`NewsRecord`], and merges everything newest-first.

pub mod adapter;
mod aggregator;
mod http;
mod types;

pub use aggregator::{merge, Aggregator};
pub use http::{HttpFeedClient, DEFAULT_FEED_TIMEOUT};
pub use types::{FeedKind, NewsRecord, NewsSource};

use async_trait::async_trait;

/// Trait for fetching a feed's raw JSON body
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// GET `url` with the given query parameters and decode the body as JSON
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> anyhow::Result<serde_json::Value>;
}
