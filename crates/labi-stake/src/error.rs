use alloy_primitives::B256;
use thiserror::Error;

/// EIP-1193 code returned by wallets when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Error)]
pub enum ErrorCode {
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed JSON-RPC response: {0}")]
    MalformedResponse(String),

    #[error("ABI decoding failed: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),

    #[error("Request rejected by the wallet: {0}")]
    Rejected(String),

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("No wallet account is connected")]
    NotConnected,

    #[error("Wallet is connected to chain {actual}, expected {expected}")]
    WrongChain { expected: u64, actual: u64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must be between {min} and {max}")]
    AmountOutOfRange { min: String, max: String },

    #[error("Insufficient token balance")]
    InsufficientBalance,

    #[error("A transaction is already awaiting confirmation")]
    TransactionInFlight,

    #[error("Missing configuration key {0}")]
    MissingConfig(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),
}

impl ErrorCode {
    /// Maps a JSON-RPC error object onto the taxonomy used by the transaction
    /// layer; a user declining the signature prompt is not a transport fault.
    pub fn from_rpc(code: i64, message: String) -> Self {
        if code == USER_REJECTED_CODE {
            ErrorCode::Rejected(message)
        } else {
            ErrorCode::Rpc { code, message }
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ErrorCode::Rejected(_))
    }
}

pub type Result<T> = std::result::Result<T, ErrorCode>;
