//! News aggregation across sources

use super::{adapter, FeedClient, NewsRecord, NewsSource};
use crate::error::{PipelineError, Result};
use crate::telemetry::{increment, CounterMetric};
use futures_util::future::join_all;
use std::sync::Arc;

/// Collects news from every configured source and merges it newest-first
pub struct Aggregator {
    client: Arc<dyn FeedClient>,
    sources: Vec<NewsSource>,
}

impl Aggregator {
    /// Create an aggregator over the given sources
    pub fn new(client: Arc<dyn FeedClient>, sources: Vec<NewsSource>) -> Self {
        Self { client, sources }
    }

    /// Configured sources
    pub fn sources(&self) -> &[NewsSource] {
        &self.sources
    }

    /// Fetch all sources and return the merged, newest-first sequence
    ///
    /// A failing source is logged and contributes nothing; collection itself
    /// never fails.
    pub async fn collect(&self) -> Vec<NewsRecord> {
        let fetches = self.sources.iter().map(|source| self.fetch_source(source));
        let results = join_all(fetches).await;

        let mut batches = Vec::with_capacity(results.len());
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(records) => {
                    tracing::info!(
                        source = %source.name,
                        count = records.len(),
                        "Collected news"
                    );
                    batches.push(records);
                }
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "Skipping news source");
                    increment(CounterMetric::SourceFailures, 1);
                }
            }
        }

        let merged = merge(batches);
        increment(CounterMetric::NewsCollected, merged.len() as u64);
        merged
    }

    async fn fetch_source(&self, source: &NewsSource) -> Result<Vec<NewsRecord>> {
        let body = self
            .client
            .get_json(&source.url, &source.params)
            .await
            .map_err(|e| PipelineError::SourceUnavailable {
                feed: source.name.clone(),
                reason: format!("{e:#}"),
            })?;

        adapter::normalize(&source.name, body)
    }
}

/// Concatenate batches and sort by publish time, newest first
///
/// The sort is stable: records with equal timestamps keep their relative
/// order (batch order, then position within the batch).
pub fn merge(batches: Vec<Vec<NewsRecord>>) -> Vec<NewsRecord> {
    let mut all: Vec<NewsRecord> = batches.into_iter().flatten().collect();
    all.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    all
}
