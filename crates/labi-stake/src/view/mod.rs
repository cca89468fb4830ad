//! Presentation view models.
//!
//! Each panel is derived purely from the latest snapshots, the transaction
//! state and the clock; rendering them is left to the front end.

pub mod minting;
pub mod positions;
pub mod rewards;
pub mod stake_form;
pub mod stats;

pub use minting::*;
pub use positions::*;
pub use rewards::*;
pub use stake_form::*;
pub use stats::*;

use crate::states::TxState;
use chrono::DateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Transient, user-dismissible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Button caption while a transaction is outstanding, if any.
pub fn busy_label(tx: &TxState) -> Option<&'static str> {
    match tx {
        TxState::PendingSignature => Some("Preparing..."),
        TxState::Confirming(_) => Some("Confirming..."),
        _ => None,
    }
}

/// `YYYY-MM-DD` in UTC.
pub fn format_date(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
