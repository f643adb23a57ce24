//! Collect command implementation

use super::build_aggregator;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Print at most this many records
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl CollectArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let aggregator = build_aggregator(config)?;
        let mut news = aggregator.collect().await;
        tracing::info!(
            sources = aggregator.sources().len(),
            count = news.len(),
            "Collection complete"
        );

        if let Some(limit) = self.limit {
            news.truncate(limit);
        }
        println!("{}", serde_json::to_string_pretty(&news)?);
        Ok(())
    }
}
