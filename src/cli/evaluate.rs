//! Evaluate command implementation

use super::build_pipeline;
use crate::config::Config;
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Markets to select, overriding `evaluator.target_count`
    #[arg(short = 'n', long)]
    pub target_count: Option<usize>,
}

impl EvaluateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config, self.target_count)?;
        let preparation = pipeline.prepare(Utc::now()).await?;
        tracing::info!(
            news = preparation.news.len(),
            markets = preparation.prepared.len(),
            "Evaluation complete, nothing submitted"
        );
        println!("{}", serde_json::to_string_pretty(&preparation.report)?);
        Ok(())
    }
}
