use crate::rpc::TransactionReceipt;
use alloy_primitives::B256;
use std::fmt;

/// Lifecycle of one user-initiated transaction. Ephemeral: held by the action
/// that started it and discarded with the session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TxState {
    #[default]
    Idle,
    /// Handed to the wallet, waiting for the user to sign.
    PendingSignature,
    /// Broadcast; waiting for a receipt.
    Confirming(B256),
    Confirmed(TransactionReceipt),
    Failed(TxFailure),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxFailure {
    /// The user declined the signature prompt.
    Rejected(String),
    /// Mined with status 0.
    Reverted(B256),
    /// The wallet or node refused the submission for another reason.
    Submission(String),
}

impl TxState {
    /// A transaction is outstanding; triggering controls should be disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, TxState::PendingSignature | TxState::Confirming(_))
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, TxState::Confirmed(_))
    }

    pub fn hash(&self) -> Option<B256> {
        match self {
            TxState::Confirming(hash) => Some(*hash),
            TxState::Confirmed(receipt) => Some(receipt.transaction_hash),
            TxState::Failed(TxFailure::Reverted(hash)) => Some(*hash),
            _ => None,
        }
    }
}

impl fmt::Display for TxFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxFailure::Rejected(_) => write!(f, "Transaction was rejected in the wallet"),
            TxFailure::Reverted(hash) => write!(f, "Transaction {} reverted", hash),
            TxFailure::Submission(message) => write!(f, "Transaction failed: {}", message),
        }
    }
}
