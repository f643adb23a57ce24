//! Sequential submission driver
//!
//! Contract calls from one account must land in nonce order, so a single
//! worker task drains a bounded queue and never has two calls in flight.

use super::{
    ContractInvoker, ContractTarget, MarketCall, PreparedMarket, SubmissionOutcome,
    SubmissionReport, SubmissionStatus,
};
use crate::error::PipelineError;
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Reference pause between consecutive submissions
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_secs(10);

/// Default submission queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Submission driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub target: ContractTarget,
    /// Pause between consecutive submissions, successful or not
    pub delay: Duration,
    pub queue_capacity: usize,
}

/// Submits prepared markets one at a time through a contract invoker
pub struct SubmissionDriver {
    invoker: Arc<dyn ContractInvoker>,
    config: DriverConfig,
}

impl SubmissionDriver {
    pub fn new(invoker: Arc<dyn ContractInvoker>, config: DriverConfig) -> Self {
        Self { invoker, config }
    }

    /// Submit every market in order and report each outcome
    ///
    /// A failed submission is logged and recorded; later markets are still
    /// submitted.
    pub async fn submit_all(&self, markets: Vec<PreparedMarket>) -> SubmissionReport {
        let (tx, rx) = mpsc::channel(self.config.queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(
            Arc::clone(&self.invoker),
            self.config.delay,
            rx,
        ));

        for prepared in &markets {
            let call = MarketCall::new(&self.config.target, prepared);
            if tx.send(call).await.is_err() {
                tracing::error!("Submission worker stopped early");
                break;
            }
        }
        drop(tx);

        match worker.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Submission worker panicked");
                SubmissionReport::default()
            }
        }
    }
}

async fn run_worker(
    invoker: Arc<dyn ContractInvoker>,
    delay: Duration,
    mut rx: mpsc::Receiver<MarketCall>,
) -> SubmissionReport {
    let mut report = SubmissionReport::default();

    while let Some(call) = rx.recv().await {
        if !report.outcomes.is_empty() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        tracing::info!(question = %call.question, "Processing market");
        let started = Instant::now();
        let result = invoker.invoke(&call).await;
        record_latency(LatencyMetric::Submission, started.elapsed());

        let status = match result {
            Ok(tx_hash) => {
                tracing::info!(question = %call.question, tx_hash = %tx_hash, "Market submitted");
                increment(CounterMetric::SubmissionsSucceeded, 1);
                SubmissionStatus::Submitted { tx_hash }
            }
            Err(e) => {
                let err = PipelineError::SubmissionFailed {
                    question: call.question.clone(),
                    reason: format!("{e:#}"),
                };
                tracing::error!(error = %err, "Error processing market");
                increment(CounterMetric::SubmissionsFailed, 1);
                SubmissionStatus::Failed {
                    reason: format!("{e:#}"),
                }
            }
        };

        report.outcomes.push(SubmissionOutcome {
            question: call.question,
            status,
        });
    }

    report
}
