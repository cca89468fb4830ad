//! Submit-and-await for user-initiated transactions.

use crate::{
    error::{ErrorCode, Result},
    rpc::{EthApi, Provider},
    session::WalletSession,
    states::{TxFailure, TxState},
};
use alloy_primitives::B256;
use log::{info, warn};
use std::{sync::Arc, thread, time::Duration};

type Observer = Box<dyn FnMut(&TxState) + Send>;

/// Drives one transaction at a time through
/// `Idle → PendingSignature → Confirming → Confirmed | Failed`.
///
/// There is no timeout: a broadcast transaction is waited on until the node
/// reports a receipt. Cancellation is whatever the wallet offers (declining the
/// signature prompt).
pub struct TxTracker<P: Provider> {
    session: Arc<WalletSession<P>>,
    state: TxState,
    poll_interval: Duration,
    observer: Option<Observer>,
}

impl<P: Provider> TxTracker<P> {
    pub fn new(session: Arc<WalletSession<P>>, poll_interval: Duration) -> Self {
        Self {
            session,
            state: TxState::Idle,
            poll_interval,
            observer: None,
        }
    }

    /// Called on every state transition, e.g. to repaint a status line.
    pub fn with_observer(mut self, observer: impl FnMut(&TxState) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &TxState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Back to `Idle` once the outcome has been shown.
    pub fn reset(&mut self) {
        if !self.is_busy() {
            self.transition(TxState::Idle);
        }
    }

    fn transition(&mut self, next: TxState) {
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    /// Submits through `submit` and blocks until the transaction settles.
    ///
    /// Refuses to start while another transaction is outstanding. Every
    /// outcome, including a rejected signature, is reported through the
    /// returned state rather than as an error.
    pub fn execute<F>(&mut self, label: &str, submit: F) -> Result<&TxState>
    where
        F: FnOnce(&WalletSession<P>) -> Result<B256>,
    {
        if self.is_busy() {
            return Err(ErrorCode::TransactionInFlight);
        }
        self.transition(TxState::PendingSignature);

        let hash = match submit(self.session.as_ref()) {
            Ok(hash) => hash,
            Err(e) => {
                let failure = match e {
                    ErrorCode::Rejected(message) => TxFailure::Rejected(message),
                    other => TxFailure::Submission(other.to_string()),
                };
                warn!("{} not submitted: {}", label, failure);
                self.transition(TxState::Failed(failure));
                return Ok(&self.state);
            }
        };

        self.transition(TxState::Confirming(hash));
        self.await_receipt(label, hash);
        Ok(&self.state)
    }

    fn await_receipt(&mut self, label: &str, hash: B256) {
        loop {
            match self.session.provider().transaction_receipt(hash) {
                Ok(Some(receipt)) => {
                    if receipt.succeeded() {
                        info!("{} confirmed: {}", label, hash);
                        self.session.invalidate();
                        self.transition(TxState::Confirmed(receipt));
                    } else {
                        warn!("{} reverted: {}", label, hash);
                        self.transition(TxState::Failed(TxFailure::Reverted(hash)));
                    }
                    return;
                }
                Ok(None) => {}
                // transient node errors do not settle the transaction
                Err(e) => warn!("receipt poll for {} failed: {}", hash, e),
            }
            thread::sleep(self.poll_interval);
        }
    }
}
