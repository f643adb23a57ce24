//! Human-facing run report

use crate::contract::{ContractParams, PreparedMarket};
use crate::evaluator::Scores;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Number;

/// Counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Evaluations returned by the evaluator
    pub total_analyzed: usize,
    /// Markets ready for submission
    pub selected_count: usize,
    /// Selected markets dropped for bad parameters or scores
    pub skipped_count: usize,
}

/// One market ready for submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub scores: Scores,
    pub recommendation: String,
    pub suggested_question: String,
    pub trading_duration_hours: Number,
    pub settlement_timestamp: String,
    pub contract_params: ContractParams,
}

impl From<&PreparedMarket> for MarketEntry {
    fn from(prepared: &PreparedMarket) -> Self {
        let news = &prepared.market.original_news;
        let evaluation = &prepared.market.evaluation;
        Self {
            title: news.title.clone(),
            source: news.source.clone(),
            published_at: news.published_at,
            scores: evaluation.scores.clone(),
            recommendation: evaluation.recommendation.clone(),
            suggested_question: evaluation.suggested_question.clone(),
            trading_duration_hours: evaluation.trading_duration_hours.clone(),
            settlement_timestamp: evaluation.settlement_timestamp.clone(),
            contract_params: prepared.params,
        }
    }
}

/// Evaluation summary plus every market that will be submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub summary: ReportSummary,
    pub selected_markets: Vec<MarketEntry>,
}

impl MarketReport {
    pub fn new(total_analyzed: usize, prepared: &[PreparedMarket], skipped_count: usize) -> Self {
        Self {
            summary: ReportSummary {
                total_analyzed,
                selected_count: prepared.len(),
                skipped_count,
            },
            selected_markets: prepared.iter().map(MarketEntry::from).collect(),
        }
    }
}
