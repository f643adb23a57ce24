//! Market selection
//!
//! Joins the evaluator's chosen ids back to the aggregated news and to the
//! matching evaluations.

use crate::error::PipelineError;
use crate::evaluator::{EvaluationBatch, EvaluationRecord};
use crate::news::NewsRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A news record paired with the evaluation that selected it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedMarket {
    pub original_news: NewsRecord,
    pub evaluation: EvaluationRecord,
}

/// Resolve `selected_ids` in order
///
/// Ids that do not index into `news`, that have no evaluation, or that repeat
/// an earlier id are dropped with a warning. Output order follows
/// `selected_ids`.
pub fn select(news: &[NewsRecord], batch: &EvaluationBatch) -> Vec<SelectedMarket> {
    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(batch.selected_ids.len());

    for &id in &batch.selected_ids {
        if !seen.insert(id) {
            tracing::warn!(id, "Ignoring duplicate selected id");
            continue;
        }

        match resolve(news, batch, id) {
            Ok(market) => selected.push(market),
            Err(e) => tracing::warn!(error = %e, "Dropping selection"),
        }
    }

    selected
}

fn resolve(
    news: &[NewsRecord],
    batch: &EvaluationBatch,
    id: i64,
) -> Result<SelectedMarket, PipelineError> {
    let record = usize::try_from(id).ok().and_then(|index| news.get(index));

    match (record, batch.evaluation(id)) {
        (Some(record), Some(evaluation)) => Ok(SelectedMarket {
            original_news: record.clone(),
            evaluation: evaluation.clone(),
        }),
        _ => Err(PipelineError::UnresolvedSelection { id }),
    }
}
