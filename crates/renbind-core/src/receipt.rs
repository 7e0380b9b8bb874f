//! Waiting for transactions to be mined.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::BindError;
use crate::log::{parse_hex_u64, Log};
use crate::transport::{request, RpcTransport};

/// A mined transaction receipt (the fields the bindings use).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// `0x1` success, `0x0` reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl Receipt {
    pub fn block_number_u64(&self) -> Option<u64> {
        self.block_number.as_deref().and_then(parse_hex_u64)
    }

    /// `None` when the chain does not report a status.
    pub fn succeeded(&self) -> Option<bool> {
        self.status.as_deref().and_then(parse_hex_u64).map(|s| s == 1)
    }
}

/// Poll `eth_getTransactionReceipt` until the transaction is mined.
///
/// Waits indefinitely; wrap in `tokio::time::timeout` to bound it.
pub async fn wait_mined(
    transport: &dyn RpcTransport,
    tx_hash: B256,
    poll_interval: Duration,
) -> Result<Receipt, BindError> {
    loop {
        let receipt: Option<Receipt> =
            request(transport, "eth_getTransactionReceipt", vec![json!(tx_hash)]).await?;
        if let Some(receipt) = receipt {
            tracing::debug!(tx = %tx_hash, block = ?receipt.block_number, "transaction mined");
            return Ok(receipt);
        }
        tracing::trace!(tx = %tx_hash, "receipt not yet available");
        tokio::time::sleep(poll_interval).await;
    }
}

/// Wait for a deployment transaction and return the deployed address.
pub async fn wait_deployed(
    transport: &dyn RpcTransport,
    tx_hash: B256,
    poll_interval: Duration,
) -> Result<Address, BindError> {
    let receipt = wait_mined(transport, tx_hash, poll_interval).await?;
    let address = receipt
        .contract_address
        .ok_or_else(|| BindError::NotADeployment(tx_hash.to_string()))?;

    // A constructor that reverts, or runs out of gas, leaves no code behind.
    let code: Bytes = request(transport, "eth_getCode", vec![json!(address), Value::from("latest")]).await?;
    if code.is_empty() {
        return Err(BindError::NoCodeAfterDeploy(address));
    }
    Ok(address)
}
