use clap::Parser;
use news_market_agent::cli::{process_env, Cli, Commands};
use news_market_agent::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });
    config.apply_env_overrides(process_env);

    // Initialize telemetry
    let _telemetry = news_market_agent::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting news-to-market run");
            args.execute(&config).await?;
        }
        Commands::Collect(args) => {
            tracing::info!("Collecting news");
            args.execute(&config).await?;
        }
        Commands::Evaluate(args) => {
            tracing::info!("Evaluating news");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
