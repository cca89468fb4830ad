use alloy_primitives::B256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Chain access failed: {0}")]
    Chain(#[from] labi_stake::ErrorCode),

    #[error("Event decoding failed: {0}")]
    Decode(#[from] alloy_sol_types::Error),

    #[error("Log is missing {0}")]
    IncompleteLog(&'static str),

    #[error("Log {0} was emitted by an unknown event")]
    UnknownEvent(B256),

    #[error("Block {0} not found")]
    MissingBlock(u64),

    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store snapshot is malformed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Query returned errors: {0}")]
    Query(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
