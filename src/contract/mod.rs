//! Contract module
//!
//! Turns selected markets into market-creation calls and submits them
//! (paper or relay mode), strictly one at a time.

mod driver;
mod paper;
pub mod params;
mod relay;
mod types;

pub use driver::{DriverConfig, SubmissionDriver, DEFAULT_QUEUE_CAPACITY, DEFAULT_SUBMISSION_DELAY};
pub use paper::PaperInvoker;
pub use params::ContractParams;
pub use relay::{RelayConfig, RelayInvoker};
pub use types::{
    ContractTarget, MarketCall, PreparedMarket, SubmissionOutcome, SubmissionReport,
    SubmissionStatus, TxHash, DEFAULT_CREATE_FUNCTION,
};

use async_trait::async_trait;

/// Trait for contract-invocation backends
#[async_trait]
pub trait ContractInvoker: Send + Sync {
    /// Execute one market-creation call and return its transaction hash
    async fn invoke(&self, call: &MarketCall) -> anyhow::Result<TxHash>;
}
