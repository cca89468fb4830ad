use crate::{
    states::StakePosition, units, DEFAULT_TOKEN_DECIMALS, DEFAULT_TOKEN_NAME,
    DEFAULT_TOKEN_SYMBOL,
};
use alloy_primitives::U256;

//
// ──────────────────────────────────────────────────────────────────────────────
// Read snapshots: one refresh worth of contract reads
// ──────────────────────────────────────────────────────────────────────────────
//
// Every field is `None` when its read failed or has not happened yet. Nothing
// here is authoritative; the next refresh replaces the whole snapshot.

/// Stake-token reads for the connected account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
    /// Balance of the connected account.
    pub balance: Option<U256>,
    /// Allowance granted by the connected account to the staking contract.
    pub allowance: Option<U256>,
}

impl TokenSnapshot {
    /// True when `amount` exceeds the current allowance. An unknown allowance
    /// always needs approval.
    pub fn needs_approval(&self, amount: U256) -> bool {
        match self.allowance {
            Some(allowance) => amount > allowance,
            None => true,
        }
    }

    /// True when `amount` exceeds the current balance. An unknown balance is
    /// always insufficient.
    pub fn has_insufficient_balance(&self, amount: U256) -> bool {
        match self.balance {
            Some(balance) => amount > balance,
            None => true,
        }
    }

    /// `needs_approval` over user input; unparsable input needs approval.
    pub fn needs_approval_for(&self, input: &str) -> bool {
        units::parse_amount(input, self.decimals())
            .map(|amount| self.needs_approval(amount))
            .unwrap_or(true)
    }

    /// `has_insufficient_balance` over user input; unparsable input is
    /// insufficient.
    pub fn has_insufficient_balance_for(&self, input: &str) -> bool {
        units::parse_amount(input, self.decimals())
            .map(|amount| self.has_insufficient_balance(amount))
            .unwrap_or(true)
    }

    /// Reported decimals, or the default when unknown or too large to scale by.
    pub fn decimals(&self) -> u8 {
        self.decimals
            .filter(|decimals| *decimals <= units::MAX_DECIMALS)
            .unwrap_or(DEFAULT_TOKEN_DECIMALS)
    }

    pub fn symbol(&self) -> &str {
        self.symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TOKEN_SYMBOL)
    }

    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TOKEN_NAME)
    }

    pub fn balance_or_zero(&self) -> U256 {
        self.balance.unwrap_or_default()
    }

    pub fn allowance_or_zero(&self) -> U256 {
        self.allowance.unwrap_or_default()
    }

    pub fn total_supply_or_zero(&self) -> U256 {
        self.total_supply.unwrap_or_default()
    }
}

/// Staking-contract reads for the connected account plus protocol totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StakingSnapshot {
    /// The user's full stake list, inactive entries included.
    pub stakes: Option<Vec<StakePosition>>,
    pub stake_count: Option<U256>,
    pub pending_rewards: Option<U256>,
    pub user_total_staked: Option<U256>,
    pub total_staked: Option<U256>,
    /// Reward rate in basis points per year.
    pub reward_rate: Option<U256>,
    /// Quoted APR in whole percent.
    pub apr: Option<U256>,
    /// Lock duration in seconds.
    pub lock_period: Option<U256>,
}

impl StakingSnapshot {
    /// Entries still open, with their `stake_id`s preserved.
    pub fn active_stakes(&self) -> Vec<&StakePosition> {
        self.stakes
            .iter()
            .flatten()
            .filter(|stake| stake.active)
            .collect()
    }

    pub fn pending_rewards_or_zero(&self) -> U256 {
        self.pending_rewards.unwrap_or_default()
    }

    pub fn user_total_staked_or_zero(&self) -> U256 {
        self.user_total_staked.unwrap_or_default()
    }

    pub fn total_staked_or_zero(&self) -> U256 {
        self.total_staked.unwrap_or_default()
    }

    /// Contract rate in basis points, or `fallback` when it could not be read
    /// or reads as zero.
    pub fn reward_rate_bps(&self, fallback: u64) -> u64 {
        self.reward_rate
            .and_then(|rate| u64::try_from(rate).ok())
            .filter(|rate| *rate > 0)
            .unwrap_or(fallback)
    }

    pub fn apr_percent(&self) -> u64 {
        self.apr
            .and_then(|apr| u64::try_from(apr).ok())
            .unwrap_or_default()
    }

    pub fn lock_period_secs(&self) -> u64 {
        self.lock_period
            .and_then(|secs| u64::try_from(secs).ok())
            .unwrap_or_default()
    }
}
