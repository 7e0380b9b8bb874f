//! Scripted in-memory transport for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
use crate::transport::RpcTransport;

type Handler = dyn Fn(&str, &[Value]) -> Result<Value, JsonRpcError> + Send + Sync;

/// A transport that answers every request with a closure and records it.
pub struct MockTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<JsonRpcRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&str, &[Value]) -> Result<Value, JsonRpcError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(method, params)` pair seen so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method.clone(), r.params.clone()))
            .collect()
    }

    /// Params of the calls made to `method`.
    pub fn calls_to(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .map(|r| r.params.clone())
            .collect()
    }

    pub fn request_ids(&self) -> Vec<RpcId> {
        self.calls.lock().unwrap().iter().map(|r| r.id.clone()).collect()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let outcome = (self.handler)(&req.method, &req.params);
        let id = req.id.clone();
        self.calls.lock().unwrap().push(req);
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Ok(JsonRpcResponse { id, result, error })
    }

    fn url(&self) -> &str {
        "mock://"
    }
}
