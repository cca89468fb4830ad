use super::{Provider, RpcRequest, RpcResponse};
use crate::error::Result;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Blocking JSON-RPC client over HTTP.
pub struct HttpProvider {
    url: String,
    client: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Provider for HttpProvider {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        log::trace!("rpc #{} {}", id, method);
        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        response.into_result()
    }
}
