//! Source adapters
//!
//! Each known feed has its own upstream JSON shape. The adapter for a source
//! is picked by the source's configured name; an unknown name yields no
//! records rather than an error.

use super::{FeedKind, NewsRecord};
use crate::error::{PipelineError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

/// Publisher name used for every Sina record
const SINA_PUBLISHER: &str = "Sina News";

/// Sina `ctime` is Beijing local time
const SINA_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Normalize a raw feed body into news records
pub fn normalize(source_name: &str, body: serde_json::Value) -> Result<Vec<NewsRecord>> {
    match FeedKind::from_name(source_name) {
        Some(FeedKind::NewsApi) => normalize_newsapi(source_name, body),
        Some(FeedKind::Sina) => normalize_sina(source_name, body),
        None => {
            tracing::warn!(source = %source_name, "No adapter registered for source");
            Ok(Vec::new())
        }
    }
}

/// newsapi.org response
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    /// "ok" or "error"
    #[serde(default)]
    status: Option<String>,
    /// Error message when status is "error"
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<NewsApiArticle>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<NewsApiPublisher>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiPublisher {
    name: Option<String>,
}

fn normalize_newsapi(source_name: &str, body: serde_json::Value) -> Result<Vec<NewsRecord>> {
    let response: NewsApiResponse =
        serde_json::from_value(body).map_err(|e| unavailable(source_name, e))?;

    if response.status.as_deref() == Some("error") {
        return Err(unavailable(
            source_name,
            response.message.unwrap_or_else(|| "error status".to_string()),
        ));
    }

    let articles = response
        .articles
        .ok_or_else(|| unavailable(source_name, "missing articles"))?;

    Ok(articles
        .into_iter()
        .filter_map(|article| {
            let published_at = parse_rfc3339(article.published_at.as_deref()?)?;
            Some(NewsRecord {
                title: article.title?,
                description: article.description.unwrap_or_default(),
                url: article.url?,
                source: article.source.and_then(|s| s.name).unwrap_or_default(),
                published_at,
                original_source: source_name.to_string(),
            })
        })
        .collect())
}

/// Sina news list response
#[derive(Debug, Deserialize)]
struct SinaResponse {
    newslist: Option<Vec<SinaItem>>,
}

#[derive(Debug, Deserialize)]
struct SinaItem {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    ctime: Option<String>,
}

fn normalize_sina(source_name: &str, body: serde_json::Value) -> Result<Vec<NewsRecord>> {
    let response: SinaResponse =
        serde_json::from_value(body).map_err(|e| unavailable(source_name, e))?;

    let items = response
        .newslist
        .ok_or_else(|| unavailable(source_name, "missing newslist"))?;

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let published_at = parse_sina_ctime(item.ctime.as_deref()?)?;
            Some(NewsRecord {
                title: item.title?,
                description: item.description.unwrap_or_default(),
                url: item.url?,
                source: SINA_PUBLISHER.to_string(),
                published_at,
                original_source: source_name.to_string(),
            })
        })
        .collect())
}

fn unavailable(source_name: &str, reason: impl ToString) -> PipelineError {
    PipelineError::SourceUnavailable {
        feed: source_name.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(value = %s, error = %e, "Dropping record with bad timestamp");
            None
        }
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS` as Beijing time, falling back to RFC 3339
fn parse_sina_ctime(s: &str) -> Option<DateTime<Utc>> {
    let naive = match NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => naive,
        Err(_) => return parse_rfc3339(s),
    };
    let beijing = FixedOffset::east_opt(SINA_UTC_OFFSET_SECS)?;
    beijing
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
