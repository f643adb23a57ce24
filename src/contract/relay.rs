//! Signing-relay contract invoker
//!
//! Forwards each market call to an external relay that holds the account key,
//! signs, and broadcasts the transaction. This process never sees the key.

use super::{ContractInvoker, MarketCall, TxHash};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Relay connection settings
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint receiving `POST` invoke requests
    pub url: String,
    /// Bearer token, if the relay requires one
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

/// Relay reply
#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(alias = "transactionHash")]
    transaction_hash: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Submits market calls through a signing relay
pub struct RelayInvoker {
    config: RelayConfig,
    client: Client,
}

impl RelayInvoker {
    pub fn new(config: RelayConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn request_body(call: &MarketCall) -> serde_json::Value {
        json!({
            "contractAddress": call.contract_address,
            "entrypoint": call.function,
            "calldata": call.calldata()
        })
    }
}

#[async_trait]
impl ContractInvoker for RelayInvoker {
    async fn invoke(&self, call: &MarketCall) -> anyhow::Result<TxHash> {
        tracing::debug!(url = %self.config.url, question = %call.question, "Sending market call to relay");

        let mut request = self
            .client
            .post(&self.config.url)
            .json(&Self::request_body(call));
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.context("Relay request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Relay error: {} - {}", status, body);
        }

        let reply: RelayResponse = response.json().await?;
        if let Some(error) = reply.error {
            anyhow::bail!("Relay rejected call: {}", error);
        }
        reply
            .transaction_hash
            .context("Relay reply has no transaction hash")
    }
}
