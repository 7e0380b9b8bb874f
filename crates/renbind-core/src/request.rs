//! JSON-RPC 2.0 wire types.
//!
//! Requests are only ever written and responses only ever read, so each type
//! carries just the serde direction it needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request id echoed back by the node. Nodes answer with the id they were
/// sent, but some proxies rewrite it to a string or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(u64),
    String(String),
    Null,
}

/// An outgoing `eth_*` request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Vec<Value>,
    pub id: RpcId,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id: RpcId::Number(id),
        }
    }
}

/// Error object returned by the node. `data` carries revert data when the
/// node reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.code, self.message)
    }
}

/// A node's answer to one [`JsonRpcRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    pub id: RpcId,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// The result value, or the node's error object.
    ///
    /// A response with neither field is a JSON `null` result (e.g. a receipt
    /// that does not exist yet).
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}
