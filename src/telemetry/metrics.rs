//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Evaluator completion call
    EvaluatorCall,
    /// One contract submission
    Submission,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// News records after aggregation
    NewsCollected,
    /// Sources that failed during collection
    SourceFailures,
    /// Markets resolved by the selector
    MarketsSelected,
    /// Selected markets dropped before submission
    MarketsSkipped,
    /// Contract calls that returned a transaction hash
    SubmissionsSucceeded,
    /// Contract calls that errored
    SubmissionsFailed,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::EvaluatorCall => "newsmarket_evaluator_latency_ms",
        LatencyMetric::Submission => "newsmarket_submission_latency_ms",
    };

    let value_ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Increment a counter
pub fn increment(metric: CounterMetric, value: u64) {
    match metric {
        CounterMetric::NewsCollected => {
            metrics::counter!("newsmarket_news_collected_total").increment(value)
        }
        CounterMetric::SourceFailures => {
            metrics::counter!("newsmarket_source_failures_total").increment(value)
        }
        CounterMetric::MarketsSelected => {
            metrics::counter!("newsmarket_markets_selected_total").increment(value)
        }
        CounterMetric::MarketsSkipped => {
            metrics::counter!("newsmarket_markets_skipped_total").increment(value)
        }
        CounterMetric::SubmissionsSucceeded => {
            metrics::counter!("newsmarket_submissions_total", "outcome" => "success")
                .increment(value)
        }
        CounterMetric::SubmissionsFailed => {
            metrics::counter!("newsmarket_submissions_total", "outcome" => "failure")
                .increment(value)
        }
    }
}
