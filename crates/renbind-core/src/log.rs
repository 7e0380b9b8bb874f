//! Contract event logs as returned by `eth_getLogs`.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// A raw EVM log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    /// `None` for pending logs.
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

impl Log {
    /// Returns the block number, if the log is mined.
    pub fn block_number_u64(&self) -> Option<u64> {
        self.block_number.as_deref().and_then(parse_hex_u64)
    }

    /// Returns the log index within its block, if the log is mined.
    pub fn log_index_u64(&self) -> Option<u64> {
        self.log_index.as_deref().and_then(parse_hex_u64)
    }
}

/// Parse a hex quantity (with or without `0x`).
pub fn parse_hex_u64(s: &str) -> Option<u64> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).ok()
}

/// Format a number as a JSON-RPC hex quantity.
pub fn hex_quantity(n: u64) -> String {
    format!("{n:#x}")
}
