//! Evaluator module
//!
//! Sends the aggregated news to an external text-generation service in a
//! single call and turns its free-form reply into a typed [`EvaluationBatch`].
//! Raw model text never leaves this module.

mod client;
mod openai;
pub mod parse;
pub mod prompt;
mod types;

pub use client::{EvaluatorClient, EvaluatorSettings, DEFAULT_TARGET_COUNT, DEFAULT_TEMPERATURE};
pub use openai::{OpenAiConfig, OpenAiProvider, OPENAI_API_URL};
pub use types::{EvaluationBatch, EvaluationRecord, NewsDigest, Scores, SCORE_RANGE};

use async_trait::async_trait;

/// One chat completion request: prompt in, text out
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

/// Trait for text-generation backends
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion and return the model's raw text
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String>;
}
