//! News record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized news article
///
/// Identity within a run is the record's position in the aggregated
/// sequence, not any field of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    /// Headline
    pub title: String,
    /// Summary text, empty when the feed has none
    pub description: String,
    /// Link to the article
    pub url: String,
    /// Human-readable publisher name
    pub source: String,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// Name of the configured feed that produced this record
    pub original_source: String,
}

/// Upstream JSON shapes we know how to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// newsapi.org `top-headlines` / `everything`
    NewsApi,
    /// Sina news list API
    Sina,
}

impl FeedKind {
    /// Resolve the adapter registered under a source name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NewsAPI" => Some(FeedKind::NewsApi),
            "Sina News API" => Some(FeedKind::Sina),
            _ => None,
        }
    }
}

/// A fully resolved news feed: where to fetch and with which query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSource {
    /// Source name, also selects the adapter
    pub name: String,
    /// Base URL
    pub url: String,
    /// Query parameters, secrets already substituted
    pub params: Vec<(String, String)>,
}

impl NewsSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}
