//! HTTP feed client

use super::FeedClient;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout for news feeds
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches feed JSON over HTTP GET
pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    /// Create a client with the given request timeout
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-market-agent/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> anyhow::Result<serde_json::Value> {
        tracing::debug!(url = %url, "Fetching news feed");

        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feed error: {} - {}", status, body);
        }

        Ok(response.json().await?)
    }
}
