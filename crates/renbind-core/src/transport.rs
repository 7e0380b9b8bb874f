//! The `RpcTransport` trait: the seam between bound contracts and a node.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// The async trait every JSON-RPC transport implements.
///
/// Implementations must be `Send + Sync` so one transport can be shared by
/// every bound contract (and their background watch tasks) as
/// `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Call `method` and deserialize the result.
///
/// An error object in the response becomes [`TransportError::Rpc`].
pub async fn request<T: DeserializeOwned>(
    transport: &dyn RpcTransport,
    method: &str,
    params: Vec<Value>,
) -> Result<T, TransportError> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    tracing::trace!(id, method, url = transport.url(), "rpc request");
    let resp = transport.send(JsonRpcRequest::new(id, method, params)).await?;
    let result = resp.into_result().map_err(TransportError::Rpc)?;
    serde_json::from_value(result).map_err(TransportError::Deserialization)
}
