//! Multi-source aggregation tests

use crate::support::{newsapi_body, sina_body, CannedFeeds};
use news_market_agent::news::{Aggregator, NewsSource};
use serde_json::json;
use std::sync::Arc;

const NEWSAPI_URL: &str = "https://newsapi.example/v2/top-headlines";
const SINA_URL: &str = "https://sina.example/api/roll";
const BROKEN_URL: &str = "https://broken.example/v2/top-headlines";

#[tokio::test]
async fn test_mixed_sources_merge_newest_first() {
    let feeds = CannedFeeds::default()
        .with(
            NEWSAPI_URL,
            newsapi_body(&[
                ("senate vote", "2025-01-01T12:00:00Z"),
                ("earnings call", "2025-01-01T03:00:00Z"),
            ]),
        )
        // 18:00 Beijing is 10:00 UTC
        .with(SINA_URL, sina_body(&[("typhoon landfall", "2025-01-01 18:00:00")]));

    let aggregator = Aggregator::new(
        Arc::new(feeds),
        vec![
            NewsSource::new("NewsAPI", NEWSAPI_URL),
            NewsSource::new("Sina News API", SINA_URL),
        ],
    );

    let news = aggregator.collect().await;
    let titles: Vec<_> = news.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["senate vote", "typhoon landfall", "earnings call"]);

    let sina = &news[1];
    assert_eq!(sina.source, "Sina News");
    assert_eq!(sina.original_source, "Sina News API");
    assert_eq!(sina.published_at.to_rfc3339(), "2025-01-01T10:00:00+00:00");
    assert_eq!(news[0].original_source, "NewsAPI");
}

#[tokio::test]
async fn test_error_status_source_is_skipped() {
    let feeds = CannedFeeds::default()
        .with(
            BROKEN_URL,
            json!({ "status": "error", "code": "apiKeyInvalid", "message": "bad key" }),
        )
        .with(SINA_URL, sina_body(&[("only story", "2025-01-01 08:00:00")]));

    let aggregator = Aggregator::new(
        Arc::new(feeds),
        vec![
            NewsSource::new("NewsAPI", BROKEN_URL),
            NewsSource::new("Sina News API", SINA_URL),
        ],
    );

    let news = aggregator.collect().await;
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].title, "only story");
}

#[tokio::test]
async fn test_unusable_records_dropped_others_kept() {
    let body = json!({
        "status": "ok",
        "articles": [
            {
                "source": { "name": "Wire" },
                "title": "kept",
                "description": null,
                "url": "https://wire.example/kept",
                "publishedAt": "2025-01-01T09:00:00Z"
            },
            {
                "source": { "name": "Wire" },
                "title": "no timestamp",
                "url": "https://wire.example/none",
                "publishedAt": "yesterday"
            }
        ]
    });
    let aggregator = Aggregator::new(
        Arc::new(CannedFeeds::default().with(NEWSAPI_URL, body)),
        vec![NewsSource::new("NewsAPI", NEWSAPI_URL)],
    );

    let news = aggregator.collect().await;
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].title, "kept");
    assert_eq!(news[0].description, "");
}
