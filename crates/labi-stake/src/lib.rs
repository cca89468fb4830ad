//! Client-side access to the Labi staking deployment.
//!
//! Everything canonical (balances, stake positions, reward accounting, lock
//! enforcement) lives in the external contracts; this crate reads snapshots of
//! that state, submits transactions through the connected wallet, and derives
//! display state from what it read.

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod flow;
pub mod interface;
pub mod refresh;
pub mod rewards;
pub mod rpc;
pub mod session;
pub mod states;
pub mod tx;
pub mod units;
pub mod view;

pub use error::{ErrorCode, Result};

/// Denominator for every rate expressed in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// 1% APR, the rate the staking contract is deployed with.
pub const DEFAULT_REWARD_RATE_BPS: u64 = 100;
/// 10% of principal forfeited on early exit.
pub const DEFAULT_EMERGENCY_PENALTY_BPS: u64 = 1_000;

pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
pub const DEFAULT_TOKEN_SYMBOL: &str = "STAKE";
pub const DEFAULT_TOKEN_NAME: &str = "Stake Token";

/// Per-stake bounds enforced by the stake form, in whole tokens.
pub const MINIMUM_STAKE_TOKENS: u64 = 1;
pub const MAXIMUM_STAKE_TOKENS: u64 = 1_000;

pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
