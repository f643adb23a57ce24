//! Configuration loading tests

use news_market_agent::config::{Config, SubmissionMode};
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.sources[1].name, "Sina News API");
    assert!(!config.sources[1].enabled);
    assert_eq!(config.evaluator.target_count, 2);
    assert_eq!(config.contract.mode, SubmissionMode::Paper);
    assert_eq!(config.telemetry.metrics_port, None);
}

#[test]
fn test_example_resolves_component_settings() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let mut config = Config::load(path).unwrap();

    let env: HashMap<&str, &str> = HashMap::from([
        ("NEWS_API_KEY", "news-key"),
        ("API_KEY", "ai-key"),
        ("RELAY_TOKEN", "relay-token"),
        ("PD_ADDRESS", "0x1234"),
        ("AI_URL", "http://localhost:9000/v1"),
    ]);
    let lookup = |key: &str| env.get(key).map(|v| v.to_string());

    config.apply_env_overrides(lookup);

    let sources = config.news_sources(lookup);
    assert_eq!(sources.len(), 1);
    assert!(sources[0]
        .params
        .contains(&("apiKey".to_string(), "news-key".to_string())));

    let openai = config.openai_config(lookup).unwrap();
    assert_eq!(openai.base_url, "http://localhost:9000/v1");
    assert_eq!(openai.api_key, "ai-key");

    let relay = config.relay_config(lookup).unwrap();
    assert_eq!(relay.auth_token.as_deref(), Some("relay-token"));

    let driver = config.driver_config();
    assert_eq!(driver.target.contract_address, "0x1234");
    assert_eq!(driver.delay, Duration::from_secs(10));
}
