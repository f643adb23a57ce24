//! Configuration types for news-market-agent
//!
//! The TOML file holds only non-secret settings. Secrets and deployment
//! overrides come from the environment and are resolved here, once, into the
//! explicit settings each component is constructed with.

use crate::contract::{
    ContractTarget, DriverConfig, RelayConfig, DEFAULT_CREATE_FUNCTION, DEFAULT_QUEUE_CAPACITY,
};
use crate::evaluator::{
    EvaluatorSettings, OpenAiConfig, DEFAULT_TARGET_COUNT, DEFAULT_TEMPERATURE, OPENAI_API_URL,
};
use crate::news::NewsSource;
use crate::pipeline::PipelineOptions;
use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Overrides `evaluator.base_url`
pub const ENV_AI_URL: &str = "AI_URL";
/// Overrides `contract.contract_address`
pub const ENV_CONTRACT_ADDRESS: &str = "PD_ADDRESS";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// News feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name; selects the adapter ("NewsAPI", "Sina News API")
    pub name: String,
    pub url: String,
    /// Static query parameters
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Environment variable holding the feed's API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Query parameter the API key is sent as
    #[serde(default = "default_api_key_param")]
    pub api_key_param: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Evaluator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default = "default_evaluator_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Markets to select per run
    #[serde(default = "default_target_count")]
    pub target_count: usize,
    #[serde(default = "default_evaluator_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_evaluator_key_env")]
    pub api_key_env: String,
    /// Skip markets whose scores are out of range or do not add up
    #[serde(default)]
    pub strict_scores: bool,
}

/// Submission mode: paper (log only) or relay (real transactions)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    #[default]
    Paper,
    Relay,
}

/// Contract submission configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub mode: SubmissionMode,
    #[serde(default = "default_function")]
    pub function: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
    /// Environment variable holding the relay bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token_env: Option<String>,
    #[serde(default = "default_submission_delay")]
    pub submission_delay_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_relay_timeout")]
    pub relay_timeout_secs: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}

fn default_true() -> bool {
    true
}
fn default_api_key_param() -> String {
    "apiKey".to_string()
}
fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig {
        name: "NewsAPI".to_string(),
        url: "https://newsapi.org/v2/top-headlines".to_string(),
        params: BTreeMap::from([("country".to_string(), "us".to_string())]),
        api_key_env: Some("NEWS_API_KEY".to_string()),
        api_key_param: default_api_key_param(),
        enabled: true,
    }]
}
fn default_evaluator_url() -> String {
    OPENAI_API_URL.to_string()
}
fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_target_count() -> usize {
    DEFAULT_TARGET_COUNT
}
fn default_evaluator_timeout() -> u64 {
    120
}
fn default_evaluator_key_env() -> String {
    "API_KEY".to_string()
}
fn default_function() -> String {
    DEFAULT_CREATE_FUNCTION.to_string()
}
fn default_submission_delay() -> u64 {
    10
}
fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
fn default_relay_timeout() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            evaluator: EvaluatorConfig::default(),
            contract: ContractConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_evaluator_url(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            target_count: DEFAULT_TARGET_COUNT,
            timeout_secs: default_evaluator_timeout(),
            api_key_env: default_evaluator_key_env(),
            strict_scores: false,
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::Paper,
            function: default_function(),
            contract_address: String::new(),
            relay_url: None,
            auth_token_env: None,
            submission_delay_secs: default_submission_delay(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            relay_timeout_secs: default_relay_timeout(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply deployment overrides from the environment
    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(ENV_AI_URL) {
            self.evaluator.base_url = url;
        }
        if let Some(address) = env(ENV_CONTRACT_ADDRESS) {
            self.contract.contract_address = address;
        }
    }

    /// Enabled news sources with API keys substituted
    pub fn news_sources(&self, env: impl Fn(&str) -> Option<String>) -> Vec<NewsSource> {
        self.sources
            .iter()
            .filter(|s| s.enabled)
            .map(|s| {
                let mut source = NewsSource::new(&s.name, &s.url);
                for (key, value) in &s.params {
                    source = source.param(key, value);
                }
                if let Some(var) = &s.api_key_env {
                    match env(var.as_str()) {
                        Some(key) => source = source.param(&s.api_key_param, key),
                        None => tracing::warn!(
                            source = %s.name,
                            env = %var,
                            "API key variable not set"
                        ),
                    }
                }
                source
            })
            .collect()
    }

    /// Chat completion connection settings
    pub fn openai_config(&self, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<OpenAiConfig> {
        let api_key = env(self.evaluator.api_key_env.as_str()).ok_or_else(|| {
            anyhow::anyhow!(
                "Evaluator API key not set (expected in {})",
                self.evaluator.api_key_env
            )
        })?;

        Ok(OpenAiConfig {
            base_url: self.evaluator.base_url.clone(),
            api_key,
            model: self.evaluator.model.clone(),
            timeout: Duration::from_secs(self.evaluator.timeout_secs),
        })
    }

    /// Evaluator call settings
    pub fn evaluator_settings(&self) -> EvaluatorSettings {
        EvaluatorSettings {
            temperature: self.evaluator.temperature,
            timeout: Duration::from_secs(self.evaluator.timeout_secs),
        }
    }

    /// Per-run pipeline options
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            target_count: self.evaluator.target_count,
            strict_scores: self.evaluator.strict_scores,
        }
    }

    /// Relay connection settings; requires `contract.relay_url`
    pub fn relay_config(&self, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<RelayConfig> {
        let url = self
            .contract
            .relay_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("contract.relay_url is required in relay mode"))?;

        Ok(RelayConfig {
            url,
            auth_token: self.contract.auth_token_env.as_deref().and_then(env),
            timeout: Duration::from_secs(self.contract.relay_timeout_secs),
        })
    }

    /// Submission driver settings
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            target: ContractTarget {
                contract_address: self.contract.contract_address.clone(),
                function: self.contract.function.clone(),
            },
            delay: Duration::from_secs(self.contract.submission_delay_secs),
            queue_capacity: self.contract.queue_capacity,
        }
    }
}
