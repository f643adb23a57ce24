//! Run command implementation

use super::{build_driver, build_pipeline};
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Log market calls instead of sending them, whatever the configured mode
    #[arg(long)]
    pub dry_run: bool,

    /// Markets to select, overriding `evaluator.target_count`
    #[arg(short = 'n', long)]
    pub target_count: Option<usize>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config, self.target_count)?;
        let driver = build_driver(config, self.dry_run)?;

        let summary = pipeline.run(&driver).await?;
        println!("{}", serde_json::to_string_pretty(&summary)?);

        if summary.submissions.failed() > 0 {
            tracing::warn!(
                failed = summary.submissions.failed(),
                "Some market submissions failed"
            );
        }
        Ok(())
    }
}
