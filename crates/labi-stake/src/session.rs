//! Wallet session: the explicit context every read and write goes through.
//!
//! A session is created when the wallet connects and torn down by
//! [`WalletSession::disconnect`]. It owns the provider handle, the connected
//! account, the deployment addresses, a short-lived read cache and the refresh
//! tasks started on its behalf.

use crate::{
    config::ClientConfig,
    error::{ErrorCode, Result},
    refresh::{RefreshHandle, Refresher},
    rpc::{CallRequest, EthApi, Provider},
};
use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use log::{debug, info};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Receiver,
        Arc, Mutex,
    },
    time::{Duration, Instant},
};

/// Addresses of the two contracts the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub staking_contract: Address,
    pub token_contract: Address,
}

impl From<&ClientConfig> for Deployment {
    fn from(config: &ClientConfig) -> Self {
        Self {
            staking_contract: config.staking_contract,
            token_contract: config.token_contract,
        }
    }
}

struct CachedRead {
    data: Bytes,
    fetched_at: Instant,
}

pub struct WalletSession<P: Provider> {
    provider: P,
    account: Address,
    chain_id: u64,
    deployment: Deployment,
    stale_time: Duration,
    connected: AtomicBool,
    cache: Mutex<HashMap<(Address, Bytes), CachedRead>>,
    refreshers: Mutex<Vec<RefreshHandle>>,
}

impl<P: Provider> WalletSession<P> {
    /// Asks the wallet for an account and checks it is on `expected_chain`.
    pub fn connect(
        provider: P,
        deployment: Deployment,
        expected_chain: u64,
        stale_time: Duration,
    ) -> Result<Self> {
        let account = provider
            .request_accounts()?
            .into_iter()
            .next()
            .ok_or(ErrorCode::NotConnected)?;
        let chain_id = provider.chain_id()?;
        if chain_id != expected_chain {
            return Err(ErrorCode::WrongChain {
                expected: expected_chain,
                actual: chain_id,
            });
        }
        info!("connected {} on chain {}", account, chain_id);
        Ok(Self {
            provider,
            account,
            chain_id,
            deployment,
            stale_time,
            connected: AtomicBool::new(true),
            cache: Mutex::new(HashMap::new()),
            refreshers: Mutex::new(Vec::new()),
        })
    }

    pub fn from_config(provider: P, config: &ClientConfig) -> Result<Self> {
        Self::connect(
            provider,
            Deployment::from(config),
            config.chain_id,
            config.stale_time,
        )
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ErrorCode::NotConnected)
        }
    }

    /// Read-only contract call, served from cache while fresh.
    pub fn read<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return> {
        self.ensure_connected()?;
        let data = Bytes::from(call.abi_encode());
        let key = (to, data.clone());

        let cached = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| {
                cache
                    .get(&key)
                    .filter(|entry| entry.fetched_at.elapsed() < self.stale_time)
                    .map(|entry| entry.data.clone())
            });
        let raw = match cached {
            Some(raw) => raw,
            None => {
                let raw = self.provider.call(&CallRequest {
                    from: Some(self.account),
                    to,
                    data,
                })?;
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(
                        key,
                        CachedRead {
                            data: raw.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                }
                raw
            }
        };
        Ok(C::abi_decode_returns(&raw, true)?)
    }

    /// Like [`read`](Self::read) but folds failures into `None`, the way the
    /// display layer treats every read.
    pub fn read_or_default<C: SolCall>(&self, to: Address, call: &C) -> Option<C::Return> {
        match self.read(to, call) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("read {} on {} failed: {}", C::SIGNATURE, to, e);
                None
            }
        }
    }

    /// Hands a state-changing call to the wallet; returns the transaction hash.
    pub fn send<C: SolCall>(&self, to: Address, call: &C) -> Result<B256> {
        self.ensure_connected()?;
        let hash = self.provider.send_transaction(&CallRequest {
            from: Some(self.account),
            to,
            data: Bytes::from(call.abi_encode()),
        })?;
        info!("submitted {} to {}: {}", C::SIGNATURE, to, hash);
        Ok(hash)
    }

    /// Drops every cached read so the next refresh hits the chain.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Runs `task` now and then every `interval` for as long as the session
    /// stays connected. Each tick drops the read cache first, so it always
    /// reaches the chain whatever the stale time.
    pub fn refresh<T, F>(self: &Arc<Self>, interval: Duration, mut task: F) -> Receiver<T>
    where
        P: Send + Sync + 'static,
        T: Send + 'static,
        F: FnMut() -> T + Send + 'static,
    {
        let session = Arc::downgrade(self);
        let (handle, updates) = Refresher::spawn(interval, move || {
            if let Some(session) = session.upgrade() {
                session.invalidate();
            }
            task()
        });
        self.track(handle);
        updates
    }

    /// Ties a refresh task to this session's lifetime.
    pub fn track(&self, handle: RefreshHandle) {
        if let Ok(mut refreshers) = self.refreshers.lock() {
            refreshers.push(handle);
        }
    }

    /// Tears the session down: cancels tracked refreshes, clears the cache and
    /// refuses further reads and writes.
    pub fn disconnect(&self) {
        if !self.connected.swap(false, Ordering::AcqRel) {
            return;
        }
        let handles = self
            .refreshers
            .lock()
            .map(|mut refreshers| std::mem::take(&mut *refreshers))
            .unwrap_or_default();
        for handle in handles {
            handle.cancel();
        }
        self.invalidate();
        info!("disconnected {}", self.account);
    }
}

impl<P: Provider> Drop for WalletSession<P> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
