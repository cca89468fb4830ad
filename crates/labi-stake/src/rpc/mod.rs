//! Minimal Ethereum JSON-RPC surface used by the client and the indexer.
//!
//! `Provider` is the only seam: it moves one request envelope and returns the
//! `result` value. The typed methods in [`EthApi`] are layered on top for every
//! provider, so test doubles only need to answer raw method calls.

pub mod http;
pub mod types;

pub use http::HttpProvider;
pub use types::*;

use crate::error::{ErrorCode, Result};
use alloy_primitives::{Address, Bytes, B256, U64};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub trait Provider: Send + Sync {
    fn request(&self, method: &str, params: Value) -> Result<Value>;
}

impl<P: Provider + ?Sized> Provider for std::sync::Arc<P> {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        (**self).request(method, params)
    }
}

impl<P: Provider + ?Sized> Provider for &P {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        (**self).request(method, params)
    }
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ErrorCode::MalformedResponse(format!("{}: {}", method, e)))
}

pub trait EthApi: Provider {
    fn chain_id(&self) -> Result<u64> {
        let id: U64 = decode("eth_chainId", self.request("eth_chainId", json!([]))?)?;
        Ok(id.to::<u64>())
    }

    fn accounts(&self) -> Result<Vec<Address>> {
        decode("eth_accounts", self.request("eth_accounts", json!([]))?)
    }

    /// Prompts the wallet for access; falls back to nothing when the endpoint
    /// only knows `eth_accounts`.
    fn request_accounts(&self) -> Result<Vec<Address>> {
        match self.request("eth_requestAccounts", json!([])) {
            Ok(value) => decode("eth_requestAccounts", value),
            Err(ErrorCode::Rpc { .. }) => self.accounts(),
            Err(e) => Err(e),
        }
    }

    fn block_number(&self) -> Result<u64> {
        let number: U64 = decode("eth_blockNumber", self.request("eth_blockNumber", json!([]))?)?;
        Ok(number.to::<u64>())
    }

    fn call(&self, tx: &CallRequest) -> Result<Bytes> {
        decode("eth_call", self.request("eth_call", json!([tx, "latest"]))?)
    }

    /// Hands the transaction to the wallet behind the endpoint, which signs it.
    fn send_transaction(&self, tx: &CallRequest) -> Result<B256> {
        decode(
            "eth_sendTransaction",
            self.request("eth_sendTransaction", json!([tx]))?,
        )
    }

    fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        decode(
            "eth_getTransactionReceipt",
            self.request("eth_getTransactionReceipt", json!([hash]))?,
        )
    }

    fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>> {
        decode("eth_getLogs", self.request("eth_getLogs", json!([filter]))?)
    }

    fn block_timestamp(&self, number: u64) -> Result<Option<u64>> {
        let block: Option<BlockHeader> = decode(
            "eth_getBlockByNumber",
            self.request(
                "eth_getBlockByNumber",
                json!([U64::from(number), false]),
            )?,
        )?;
        Ok(block.map(|b| b.timestamp.to::<u64>()))
    }
}

impl<P: Provider + ?Sized> EthApi for P {}
