//! Evaluator request and response types

use crate::error::PipelineError;
use crate::news::NewsRecord;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Inclusive bounds of each individual score
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Simplified news view sent to the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsDigest {
    /// Index into the aggregated news sequence
    pub id: usize,
    pub title: String,
    pub description: String,
    pub source: String,
}

impl NewsDigest {
    /// Build the digest list for a news sequence, one entry per record
    pub fn from_records(news: &[NewsRecord]) -> Vec<Self> {
        news.iter()
            .enumerate()
            .map(|(id, record)| Self {
                id,
                title: record.title.clone(),
                description: record.description.clone(),
                source: record.source.clone(),
            })
            .collect()
    }
}

/// Suitability scores assigned by the evaluator
///
/// Kept as raw JSON numbers: any numeric value parses, and only strict mode
/// looks at ranges and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub verifiability: Number,
    pub timeline: Number,
    pub public_interest: Number,
    pub non_triviality: Number,
    /// Expected to equal the sum of the four scores above
    pub total_score: Number,
}

impl Scores {
    /// Check ranges, whole numbers and the total. Returns a description of
    /// the first problem.
    pub fn check(&self) -> Result<(), String> {
        let parts = [
            ("verifiability", &self.verifiability),
            ("timeline", &self.timeline),
            ("publicInterest", &self.public_interest),
            ("nonTriviality", &self.non_triviality),
        ];

        let mut sum = 0.0;
        for (name, value) in parts {
            let score = as_f64(value);
            if !SCORE_RANGE.contains(&score) {
                return Err(format!("{name} score {value} outside 0-10"));
            }
            if score.fract() != 0.0 {
                return Err(format!("{name} score {value} is not a whole number"));
            }
            sum += score;
        }

        if as_f64(&self.total_score) != sum {
            return Err(format!(
                "totalScore {} does not match sum {}",
                self.total_score, sum
            ));
        }

        Ok(())
    }
}

fn as_f64(value: &Number) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

/// The evaluator's assessment of one news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    /// Index of the evaluated news record
    pub id: i64,
    /// Echo of the headline, not authoritative
    #[serde(default)]
    pub title: String,
    pub scores: Scores,
    #[serde(default)]
    pub recommendation: String,
    /// Market question to submit on-chain
    pub suggested_question: String,
    /// Raw JSON number; converted and validated when parameters are built
    pub trading_duration_hours: Number,
    /// ISO-8601 instant when the outcome becomes known
    pub settlement_timestamp: String,
}

impl EvaluationRecord {
    /// Strict score validation, only applied when enabled in config
    pub fn check_scores(&self) -> Result<(), PipelineError> {
        self.scores
            .check()
            .map_err(|reason| PipelineError::InvalidEvaluation {
                id: self.id,
                reason,
            })
    }
}

/// Parsed evaluator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationBatch {
    pub evaluations: Vec<EvaluationRecord>,
    /// Chosen news indices, best first
    pub selected_ids: Vec<i64>,
}

impl EvaluationBatch {
    /// Find the evaluation for a news index
    pub fn evaluation(&self, id: i64) -> Option<&EvaluationRecord> {
        self.evaluations.iter().find(|e| e.id == id)
    }
}
