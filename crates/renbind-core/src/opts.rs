//! Per-operation options: which block to call against, who sends a
//! transaction, which block range to filter.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use serde_json::{json, Map, Value};

use crate::log::hex_quantity;

/// Block selector for read-only calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockTag {
    #[default]
    Latest,
    Pending,
    Number(u64),
}

impl BlockTag {
    pub fn to_param(self) -> Value {
        match self {
            Self::Latest => json!("latest"),
            Self::Pending => json!("pending"),
            Self::Number(n) => json!(hex_quantity(n)),
        }
    }
}

/// Options for `eth_call`.
#[derive(Debug, Clone, Default)]
pub struct CallOpts {
    pub from: Option<Address>,
    pub block: BlockTag,
}

impl CallOpts {
    pub fn at_block(number: u64) -> Self {
        Self {
            from: None,
            block: BlockTag::Number(number),
        }
    }
}

/// Options for `eth_sendTransaction`. Unset fields are filled in by the node.
#[derive(Debug, Clone, Default)]
pub struct TransactOpts {
    pub from: Address,
    pub value: Option<U256>,
    pub gas_limit: Option<u64>,
    pub gas_price: Option<U256>,
    pub nonce: Option<u64>,
}

impl TransactOpts {
    pub fn from(from: Address) -> Self {
        Self {
            from,
            ..Self::default()
        }
    }

    /// Build the transaction object for `eth_sendTransaction`.
    pub(crate) fn to_tx_object(&self, to: Option<Address>, data: &[u8]) -> Value {
        let mut tx = Map::new();
        tx.insert("from".into(), json!(self.from));
        if let Some(to) = to {
            tx.insert("to".into(), json!(to));
        }
        tx.insert("data".into(), json!(format!("0x{}", hex::encode(data))));
        if let Some(value) = self.value {
            tx.insert("value".into(), json!(value));
        }
        if let Some(gas) = self.gas_limit {
            tx.insert("gas".into(), json!(hex_quantity(gas)));
        }
        if let Some(price) = self.gas_price {
            tx.insert("gasPrice".into(), json!(price));
        }
        if let Some(nonce) = self.nonce {
            tx.insert("nonce".into(), json!(hex_quantity(nonce)));
        }
        Value::Object(tx)
    }
}

/// Block range for historical log queries.
#[derive(Debug, Clone)]
pub struct FilterOpts {
    pub start: u64,
    /// `None` = up to the current head.
    pub end: Option<u64>,
    /// Widest range requested in a single `eth_getLogs`.
    pub max_block_range: u64,
}

impl Default for FilterOpts {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            max_block_range: 10_000,
        }
    }
}

impl FilterOpts {
    pub fn range(start: u64, end: Option<u64>) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }
}

/// Options for live log watching.
#[derive(Debug, Clone)]
pub struct WatchOpts {
    /// First block to report. `None` = the block after the current head.
    pub start: Option<u64>,
    pub poll_interval: Duration,
    /// Widest range requested in a single `eth_getLogs` while catching up.
    pub max_block_range: u64,
}

impl Default for WatchOpts {
    fn default() -> Self {
        Self {
            start: None,
            poll_interval: Duration::from_secs(2),
            max_block_range: FilterOpts::default().max_block_range,
        }
    }
}
