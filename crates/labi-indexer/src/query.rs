//! Read-only access to a hosted deployment of the indexer.

use crate::error::{IndexerError, Result};
use log::error;
use serde::Deserialize;
use serde_json::{json, Value};

/// The five most recent token transfers.
pub const TRANSFERS_QUERY: &str = "{
  transfers(first: 5) {
    id
    _to
    _from
    amount
  }
}";

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

pub struct SubgraphClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl SubgraphClient {
    /// `api_key`, when present, is sent as a bearer token.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `query` and returns its `data` member.
    pub fn query(&self, query: &str) -> Result<Value> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": {} }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response: GraphQlResponse = request.send()?.error_for_status()?.json()?;
        if !response.errors.is_empty() {
            let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(IndexerError::Query(messages.join("; ")));
        }
        response
            .data
            .ok_or_else(|| IndexerError::Query("response carries no data".to_string()))
    }

    /// Runs [`TRANSFERS_QUERY`] and returns the data serialized as JSON.
    /// Failures are logged and yield `None`.
    pub fn fetch_transfers(&self) -> Option<String> {
        match self.query(TRANSFERS_QUERY) {
            Ok(data) => Some(data.to_string()),
            Err(e) => {
                error!("transfers query against {} failed: {}", self.endpoint, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_are_surfaced() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "errors": [{ "message": "bad field" }]
        }))
        .unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "bad field");
    }

    #[test]
    fn unreachable_endpoint_yields_none() {
        let client = SubgraphClient::new("http://127.0.0.1:9/subgraphs/labi", None);
        assert_eq!(client.fetch_transfers(), None);
    }
}
