//! Paper contract invoker

use super::{ContractInvoker, MarketCall, TxHash};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Records market calls without touching any chain
pub struct PaperInvoker {
    calls: Arc<RwLock<Vec<MarketCall>>>,
}

impl PaperInvoker {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(vec![])),
        }
    }

    /// Calls received so far, in order
    pub async fn calls(&self) -> Vec<MarketCall> {
        self.calls.read().await.clone()
    }
}

impl Default for PaperInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractInvoker for PaperInvoker {
    async fn invoke(&self, call: &MarketCall) -> anyhow::Result<TxHash> {
        let tx_hash = format!("0x{}", Uuid::new_v4().simple());

        tracing::info!(
            tx_hash = %tx_hash,
            function = %call.function,
            calldata = %call.calldata(),
            "Paper market created"
        );

        self.calls.write().await.push(call.clone());
        Ok(tx_hash)
    }
}
