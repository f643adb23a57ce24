//! CLI interface for news-market-agent
//!
//! Provides subcommands for:
//! - `run`: Full pipeline, ending in market submission
//! - `collect`: Fetch and print merged news only
//! - `evaluate`: Collect, evaluate and print the market report without submitting
//! - `config`: Show the effective configuration

mod collect;
mod evaluate;
mod run;

pub use collect::CollectArgs;
pub use evaluate::EvaluateArgs;
pub use run::RunArgs;

use crate::config::{Config, SubmissionMode};
use crate::contract::{ContractInvoker, PaperInvoker, RelayInvoker, SubmissionDriver};
use crate::evaluator::{EvaluatorClient, OpenAiProvider};
use crate::news::{Aggregator, HttpFeedClient, DEFAULT_FEED_TIMEOUT};
use crate::pipeline::{Pipeline, PipelineOptions};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "news-market-agent")]
#[command(about = "Creates prediction markets from breaking news")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect, evaluate and submit markets
    Run(RunArgs),
    /// Collect and print merged news
    Collect(CollectArgs),
    /// Evaluate news and print the market report without submitting
    Evaluate(EvaluateArgs),
    /// Show effective configuration
    Config,
}

/// Environment lookup used by every subcommand
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn build_aggregator(config: &Config) -> anyhow::Result<Aggregator> {
    let client = HttpFeedClient::new(DEFAULT_FEED_TIMEOUT)?;
    Ok(Aggregator::new(
        Arc::new(client),
        config.news_sources(process_env),
    ))
}

fn build_pipeline(config: &Config, target_count: Option<usize>) -> anyhow::Result<Pipeline> {
    let provider = OpenAiProvider::new(config.openai_config(process_env)?)?;
    tracing::info!(model = provider.model(), "Evaluator provider ready");
    let evaluator = EvaluatorClient::new(Arc::new(provider), config.evaluator_settings());

    let mut options: PipelineOptions = config.pipeline_options();
    if let Some(count) = target_count {
        options.target_count = count;
    }

    Ok(Pipeline::new(build_aggregator(config)?, evaluator, options))
}

fn build_driver(config: &Config, dry_run: bool) -> anyhow::Result<SubmissionDriver> {
    let mode = if dry_run {
        SubmissionMode::Paper
    } else {
        config.contract.mode
    };

    let invoker: Arc<dyn ContractInvoker> = match mode {
        SubmissionMode::Paper => Arc::new(PaperInvoker::new()),
        SubmissionMode::Relay => {
            if config.contract.contract_address.is_empty() {
                anyhow::bail!("contract.contract_address (or PD_ADDRESS) is required in relay mode");
            }
            Arc::new(RelayInvoker::new(config.relay_config(process_env)?)?)
        }
    };

    tracing::info!(?mode, "Submission mode");
    Ok(SubmissionDriver::new(invoker, config.driver_config()))
}
