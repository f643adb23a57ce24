//! News-to-market pipeline
//!
//! collect -> evaluate -> select -> build params -> submit. Each stage hands
//! an owned snapshot to the next. Per-item failures are logged and skipped;
//! only an unusable evaluator batch aborts a run, and it does so before any
//! submission.

use crate::contract::{ContractParams, PreparedMarket, SubmissionDriver, SubmissionReport};
use crate::error::Result;
use crate::evaluator::{EvaluatorClient, DEFAULT_TARGET_COUNT};
use crate::news::{Aggregator, NewsRecord};
use crate::report::MarketReport;
use crate::selection::{select, SelectedMarket};
use crate::telemetry::{increment, CounterMetric};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

/// Run options
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Markets to ask the evaluator for
    pub target_count: usize,
    /// Skip markets whose scores fail validation
    pub strict_scores: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            strict_scores: false,
        }
    }
}

/// Everything produced before submission
#[derive(Debug, Clone, Default)]
pub struct Preparation {
    pub news: Vec<NewsRecord>,
    pub prepared: Vec<PreparedMarket>,
    pub report: MarketReport,
}

/// Outcome of a full run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: Uuid,
    pub report: MarketReport,
    pub submissions: SubmissionReport,
}

/// Orchestrates one news-to-market run
pub struct Pipeline {
    aggregator: Aggregator,
    evaluator: EvaluatorClient,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(aggregator: Aggregator, evaluator: EvaluatorClient, options: PipelineOptions) -> Self {
        Self {
            aggregator,
            evaluator,
            options,
        }
    }

    /// Collect and merge news from every source
    pub async fn collect(&self) -> Vec<NewsRecord> {
        self.aggregator.collect().await
    }

    /// Collect, evaluate, select and build contract parameters
    ///
    /// `now` is the run start; settlement times must lie after it.
    pub async fn prepare(&self, now: DateTime<Utc>) -> Result<Preparation> {
        let news = self.collect().await;
        if news.is_empty() {
            tracing::warn!("No news collected, nothing to evaluate");
            return Ok(Preparation::default());
        }

        let target_count = self.options.target_count.min(news.len());
        if target_count < self.options.target_count {
            tracing::warn!(
                requested = self.options.target_count,
                available = news.len(),
                "Fewer news items than target count, reducing target"
            );
        }

        let batch = self.evaluator.evaluate(&news, target_count).await?;

        let selected = select(&news, &batch);
        increment(CounterMetric::MarketsSelected, selected.len() as u64);

        let (prepared, skipped) = prepare_markets(selected, now, self.options.strict_scores);
        let report = MarketReport::new(batch.evaluations.len(), &prepared, skipped);

        Ok(Preparation {
            news,
            prepared,
            report,
        })
    }

    /// Full run: prepare, then submit every prepared market in order
    pub async fn run(&self, driver: &SubmissionDriver) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline_run", %run_id);

        async move {
            let now = Utc::now();
            tracing::info!(started_at = %now, "Starting pipeline run");

            let preparation = self.prepare(now).await.inspect_err(|e| {
                tracing::error!(error = %e, "Run aborted before submission");
            })?;

            match serde_json::to_string_pretty(&preparation.report) {
                Ok(json) => tracing::info!(report = %json, "News analysis result"),
                Err(e) => tracing::warn!(error = %e, "Could not render report"),
            }

            let submissions = driver.submit_all(preparation.prepared).await;
            tracing::info!(
                attempted = submissions.attempted(),
                succeeded = submissions.succeeded(),
                failed = submissions.failed(),
                "Pipeline run complete"
            );

            Ok(RunSummary {
                run_id,
                report: preparation.report,
                submissions,
            })
        }
        .instrument(span)
        .await
    }
}

/// Build contract parameters for each selected market, dropping bad ones
///
/// Returns the prepared markets in selection order and the number skipped.
pub fn prepare_markets(
    selected: Vec<SelectedMarket>,
    now: DateTime<Utc>,
    strict_scores: bool,
) -> (Vec<PreparedMarket>, usize) {
    let mut prepared = Vec::with_capacity(selected.len());
    let mut skipped = 0;

    for market in selected {
        match prepare_one(&market, now, strict_scores) {
            Ok(params) => prepared.push(PreparedMarket { market, params }),
            Err(e) => {
                tracing::warn!(
                    question = %market.evaluation.suggested_question,
                    error = %e,
                    "Skipping market"
                );
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        increment(CounterMetric::MarketsSkipped, skipped as u64);
    }
    (prepared, skipped)
}

fn prepare_one(
    market: &SelectedMarket,
    now: DateTime<Utc>,
    strict_scores: bool,
) -> Result<ContractParams> {
    if strict_scores {
        market.evaluation.check_scores()?;
    }
    ContractParams::build(&market.evaluation, now)
}
