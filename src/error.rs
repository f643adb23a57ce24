//! Pipeline error kinds
//!
//! Each variant carries enough context to identify the affected source,
//! evaluation or market in a log line. Whether a variant is fatal to the run
//! or only to a single item is decided by the stage that produces it.

use thiserror::Error;

/// Errors produced by the news-to-market pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A news feed could not be fetched or decoded
    #[error("Source {feed} unavailable: {reason}")]
    SourceUnavailable { feed: String, reason: String },

    /// The evaluator's reply did not contain a parseable evaluation batch
    #[error("Malformed evaluator response: {0}")]
    MalformedEvaluatorResponse(String),

    /// The evaluator call itself failed (transport, auth, empty reply)
    #[error("Evaluator call failed: {0}")]
    Evaluator(String),

    /// Requested selection size cannot be satisfied
    #[error("Invalid target count {requested} for {available} news items")]
    InvalidTargetCount { requested: usize, available: usize },

    /// A selected id has no matching news record or evaluation
    #[error("Selected id {id} does not resolve to a news record and evaluation")]
    UnresolvedSelection { id: i64 },

    /// Evaluator scores out of range or inconsistent (strict mode only)
    #[error("Invalid evaluation {id}: {reason}")]
    InvalidEvaluation { id: i64, reason: String },

    /// Trading duration is not a positive number of seconds
    #[error("Invalid trading duration: {hours} hours")]
    InvalidDuration { hours: String },

    /// Settlement timestamp is unparseable or not in the future
    #[error("Invalid settlement time {value:?}: {reason}")]
    InvalidSettlementTime { value: String, reason: String },

    /// The contract call was rejected or errored
    #[error("Submission failed for {question:?}: {reason}")]
    SubmissionFailed { question: String, reason: String },
}

impl PipelineError {
    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::MalformedEvaluatorResponse(_)
                | PipelineError::Evaluator(_)
                | PipelineError::InvalidTargetCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
