//! End-to-end pipeline tests against in-process fakes

use crate::support::{evaluation, newsapi_body, CannedFeeds, RecordingInvoker, ScriptedProvider};
use news_market_agent::contract::{
    ContractTarget, DriverConfig, SubmissionDriver, SubmissionStatus,
};
use news_market_agent::error::PipelineError;
use news_market_agent::evaluator::{EvaluatorClient, EvaluatorSettings};
use news_market_agent::news::{Aggregator, NewsSource};
use news_market_agent::pipeline::{Pipeline, PipelineOptions};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

const FEED_A: &str = "https://feed-a.example/top";
const FEED_B: &str = "https://feed-b.example/top";

fn three_story_feeds() -> CannedFeeds {
    CannedFeeds::default()
        .with(
            FEED_A,
            newsapi_body(&[
                ("rate decision", "2025-01-01T12:00:00Z"),
                ("cup final", "2025-01-01T10:00:00Z"),
            ]),
        )
        .with(FEED_B, newsapi_body(&[("launch window", "2025-01-01T11:00:00Z")]))
}

fn pipeline(feeds: CannedFeeds, provider: Arc<ScriptedProvider>, target_count: usize) -> Pipeline {
    let aggregator = Aggregator::new(
        Arc::new(feeds),
        vec![
            NewsSource::new("NewsAPI", FEED_A),
            NewsSource::new("NewsAPI", FEED_B),
        ],
    );
    let evaluator = EvaluatorClient::new(provider, EvaluatorSettings::default());
    Pipeline::new(
        aggregator,
        evaluator,
        PipelineOptions {
            target_count,
            strict_scores: false,
        },
    )
}

fn driver(invoker: Arc<RecordingInvoker>) -> SubmissionDriver {
    SubmissionDriver::new(
        invoker,
        DriverConfig {
            target: ContractTarget {
                contract_address: "0xmarkets".to_string(),
                function: "create".to_string(),
            },
            delay: Duration::ZERO,
            queue_capacity: 4,
        },
    )
}

fn three_market_reply() -> String {
    let batch = json!({
        "evaluations": [
            evaluation(0, "Will rates be cut?", 24.0, "2099-01-01T00:00:00Z"),
            evaluation(1, "Will the launch happen?", 48.0, "2099-02-01T00:00:00Z"),
            evaluation(2, "Will the home side win?", 12.0, "2099-03-01T00:00:00Z")
        ],
        "selectedIds": [0, 1, 2]
    });
    format!("Here are the results:\n{batch}\nLet me know if you need more.")
}

#[tokio::test]
async fn test_failed_submission_does_not_stop_run() {
    let provider = Arc::new(ScriptedProvider::replying(three_market_reply()));
    let invoker = Arc::new(RecordingInvoker {
        fail_questions: vec!["Will the launch happen?".to_string()],
        ..Default::default()
    });

    let summary = pipeline(three_story_feeds(), provider.clone(), 3)
        .run(&driver(invoker.clone()))
        .await
        .unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(summary.submissions.attempted(), 3);
    assert_eq!(summary.submissions.failed(), 1);
    assert_eq!(summary.submissions.succeeded(), 2);
    assert!(matches!(
        summary.submissions.outcomes[1].status,
        SubmissionStatus::Failed { .. }
    ));

    let calls = invoker.calls.lock().unwrap();
    let questions: Vec<_> = calls.iter().map(|c| c.question.as_str()).collect();
    assert_eq!(
        questions,
        vec![
            "Will rates be cut?",
            "Will the launch happen?",
            "Will the home side win?"
        ]
    );
    assert_eq!(calls[0].contract_address, "0xmarkets");
    assert_eq!(calls[0].trading_duration_seconds, 86400);
    assert_eq!(calls[2].trading_duration_seconds, 43200);
}

#[tokio::test]
async fn test_selection_follows_merged_order() {
    // Merged newest-first: 0 = rate decision, 1 = launch window, 2 = cup final
    let provider = Arc::new(ScriptedProvider::replying(three_market_reply()));

    let preparation = pipeline(three_story_feeds(), provider, 3)
        .prepare("2025-01-01T00:00:00Z".parse().unwrap())
        .await
        .unwrap();

    let titles: Vec<_> = preparation
        .prepared
        .iter()
        .map(|p| p.market.original_news.title.as_str())
        .collect();
    assert_eq!(titles, vec!["rate decision", "launch window", "cup final"]);
    assert_eq!(preparation.report.summary.total_analyzed, 3);
    assert_eq!(preparation.report.summary.selected_count, 3);
}

#[tokio::test]
async fn test_malformed_evaluator_reply_aborts_before_submission() {
    let provider = Arc::new(ScriptedProvider::replying("I could not evaluate these."));
    let invoker = Arc::new(RecordingInvoker::default());

    let result = pipeline(three_story_feeds(), provider, 2)
        .run(&driver(invoker.clone()))
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::MalformedEvaluatorResponse(_))
    ));
    assert!(invoker.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_markets_are_skipped() {
    let batch = json!({
        "evaluations": [
            evaluation(0, "Already settled?", 24.0, "2001-01-01T00:00:00Z"),
            evaluation(1, "Zero length?", 0.0, "2099-01-01T00:00:00Z"),
            evaluation(2, "Valid?", 6.0, "2099-01-01")
        ],
        "selectedIds": [0, 1, 7, 2]
    });
    let provider = Arc::new(ScriptedProvider::replying(batch.to_string()));
    let invoker = Arc::new(RecordingInvoker::default());

    let summary = pipeline(three_story_feeds(), provider, 3)
        .run(&driver(invoker.clone()))
        .await
        .unwrap();

    assert_eq!(summary.report.summary.selected_count, 1);
    assert_eq!(summary.report.summary.skipped_count, 2);
    assert_eq!(summary.submissions.attempted(), 1);

    let calls = invoker.calls.lock().unwrap();
    assert_eq!(calls[0].question, "Valid?");
    assert_eq!(calls[0].trading_duration_seconds, 21600);
    assert_eq!(calls[0].settlement_unix_timestamp, 4070908800);
}

#[tokio::test]
async fn test_no_news_skips_evaluator() {
    let provider = Arc::new(ScriptedProvider::replying(three_market_reply()));
    let invoker = Arc::new(RecordingInvoker::default());

    let summary = pipeline(CannedFeeds::default(), provider.clone(), 2)
        .run(&driver(invoker.clone()))
        .await
        .unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    assert_eq!(summary.submissions.attempted(), 0);
    assert!(summary.report.selected_markets.is_empty());
}

#[tokio::test]
async fn test_target_count_reduced_to_available_news() {
    let feeds = CannedFeeds::default().with(
        FEED_A,
        newsapi_body(&[("only story", "2025-01-01T12:00:00Z")]),
    );
    let batch = json!({
        "evaluations": [evaluation(0, "Will it happen?", 24.0, "2099-01-01T00:00:00Z")],
        "selectedIds": [0]
    });
    let provider = Arc::new(ScriptedProvider::replying(batch.to_string()));
    let invoker = Arc::new(RecordingInvoker::default());

    let summary = pipeline(feeds, provider.clone(), 5)
        .run(&driver(invoker))
        .await
        .unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(summary.submissions.succeeded(), 1);
}

#[tokio::test]
async fn test_odd_numbers_only_cost_their_own_market() {
    let mut huge = evaluation(0, "Will rates be cut?", 24.0, "2099-01-01T00:00:00Z");
    huge["tradingDurationHours"] = json!(1e30);
    let mut fractional = evaluation(1, "Will the launch happen?", 48.0, "2099-02-01T00:00:00Z");
    fractional["scores"]["timeline"] = json!(6.5);
    let batch = json!({
        "evaluations": [huge, fractional],
        "selectedIds": [0, 1]
    });
    let provider = Arc::new(ScriptedProvider::replying(batch.to_string()));
    let invoker = Arc::new(RecordingInvoker::default());

    let summary = pipeline(three_story_feeds(), provider, 2)
        .run(&driver(invoker.clone()))
        .await
        .unwrap();

    assert_eq!(summary.report.summary.skipped_count, 1);
    assert_eq!(summary.submissions.succeeded(), 1);
    let calls = invoker.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].question, "Will the launch happen?");
    assert_eq!(calls[0].trading_duration_seconds, 172800);
}
