//! Error types.
//!
//! Nothing in this crate retries or reinterprets a failure. Each variant only
//! names the layer that produced it so callers can tell an ABI mismatch from a
//! node-side revert.

use alloy_primitives::Address;
use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors that can occur during an RPC transport operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, bad status, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors returned by bound contracts and the generated bindings.
#[derive(Debug, Error)]
pub enum BindError {
    /// The ABI JSON could not be parsed.
    #[error("invalid ABI JSON: {0}")]
    Abi(#[source] serde_json::Error),

    #[error("method '{0}' not found in ABI")]
    UnknownMethod(String),

    #[error("event '{0}' not found in ABI")]
    UnknownEvent(String),

    /// Arguments did not match the ABI inputs.
    #[error("ABI encode failed for '{name}': {reason}")]
    Encode { name: String, reason: String },

    /// Return data or log data did not match the ABI outputs.
    #[error("ABI decode failed for '{name}': {reason}")]
    Decode { name: String, reason: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("missing output value at position {index}")]
    MissingOutput { index: usize },

    /// `eth_call` returned nothing and there is no code at the address.
    #[error("no contract code at {0}")]
    NoCode(Address),

    #[error("no contract code after deployment at {0}")]
    NoCodeAfterDeploy(Address),

    #[error("receipt for {0} has no contract address")]
    NotADeployment(String),

    #[error("bytecode references unlinked library '{0}'")]
    UnlinkedLibrary(String),

    #[error("invalid bytecode: {0}")]
    InvalidBytecode(String),

    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BindError {
    pub(crate) fn mismatch(expected: impl Into<String>, got: impl std::fmt::Debug) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: format!("{got:?}"),
        }
    }

    /// Returns `true` if the node rejected the request itself (revert, bad
    /// params) rather than the request failing to reach it.
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Rpc(_)))
    }
}
