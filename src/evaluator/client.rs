//! Evaluator client

use super::parse::parse_batch;
use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::{CompletionProvider, CompletionRequest, EvaluationBatch, NewsDigest};
use crate::error::{PipelineError, Result};
use crate::news::NewsRecord;
use crate::telemetry::{record_latency, LatencyMetric};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default number of markets to select per run
pub const DEFAULT_TARGET_COUNT: usize = 2;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Evaluator call settings
#[derive(Debug, Clone)]
pub struct EvaluatorSettings {
    pub temperature: f64,
    /// Upper bound on the whole evaluator call
    pub timeout: Duration,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Scores and selects news through an external text-generation service
pub struct EvaluatorClient {
    provider: Arc<dyn CompletionProvider>,
    settings: EvaluatorSettings,
}

impl EvaluatorClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: EvaluatorSettings) -> Self {
        Self { provider, settings }
    }

    /// Evaluate every news record and ask for `target_count` selections
    ///
    /// Issues exactly one completion call. Fails if `target_count` is zero or
    /// exceeds the number of records, if the call fails, or if the reply holds
    /// no parseable batch.
    pub async fn evaluate(
        &self,
        news: &[NewsRecord],
        target_count: usize,
    ) -> Result<EvaluationBatch> {
        if target_count == 0 || target_count > news.len() {
            return Err(PipelineError::InvalidTargetCount {
                requested: target_count,
                available: news.len(),
            });
        }

        let digests = NewsDigest::from_records(news);
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(&digests, target_count),
            temperature: self.settings.temperature,
        };

        tracing::info!(
            items = digests.len(),
            target_count,
            "Requesting news evaluation"
        );

        let started = Instant::now();
        let raw = tokio::time::timeout(self.settings.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| {
                PipelineError::Evaluator(format!(
                    "timed out after {}s",
                    self.settings.timeout.as_secs()
                ))
            })?
            .map_err(|e| PipelineError::Evaluator(format!("{e:#}")))?;
        record_latency(LatencyMetric::EvaluatorCall, started.elapsed());

        let batch = parse_batch(&raw).inspect_err(|e| {
            tracing::error!(error = %e, raw_response = %raw, "Unusable evaluator response");
        })?;

        tracing::info!(
            evaluations = batch.evaluations.len(),
            selected = ?batch.selected_ids,
            "News evaluation complete"
        );

        Ok(batch)
    }
}
