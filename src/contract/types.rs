//! Contract submission types

use super::ContractParams;
use crate::selection::SelectedMarket;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Transaction identifier returned by the chain
pub type TxHash = String;

/// Default market-creation entrypoint
pub const DEFAULT_CREATE_FUNCTION: &str = "create";

/// Which contract function receives market creations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTarget {
    pub contract_address: String,
    pub function: String,
}

/// A selected market with its validated contract parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedMarket {
    pub market: SelectedMarket,
    pub params: ContractParams,
}

impl PreparedMarket {
    /// The question that will be written on-chain
    pub fn question(&self) -> &str {
        &self.market.evaluation.suggested_question
    }
}

/// One market-creation contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCall {
    pub contract_address: String,
    pub function: String,
    pub question: String,
    pub trading_duration_seconds: u64,
    pub settlement_unix_timestamp: i64,
}

impl MarketCall {
    /// Build the call for a prepared market
    pub fn new(target: &ContractTarget, prepared: &PreparedMarket) -> Self {
        Self {
            contract_address: target.contract_address.clone(),
            function: target.function.clone(),
            question: prepared.question().to_string(),
            trading_duration_seconds: prepared.params.trading_duration_seconds,
            settlement_unix_timestamp: prepared.params.settlement_unix_timestamp,
        }
    }

    /// Ordered calldata: `[question, durationSeconds, settlementUnixTimestamp]`
    pub fn calldata(&self) -> serde_json::Value {
        json!([
            self.question,
            self.trading_duration_seconds,
            self.settlement_unix_timestamp
        ])
    }
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SubmissionStatus {
    Submitted {
        #[serde(rename = "txHash")]
        tx_hash: TxHash,
    },
    Failed { reason: String },
}

/// Per-market submission outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub question: String,
    #[serde(flatten)]
    pub status: SubmissionStatus,
}

/// Outcomes of a submission run, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub outcomes: Vec<SubmissionOutcome>,
}

impl SubmissionReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SubmissionStatus::Submitted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}
