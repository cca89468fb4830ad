use crate::interface::IStakingContract::StakeInfo;
use alloy_primitives::U256;

//
// ──────────────────────────────────────────────────────────────────────────────
// Stake Position
// ──────────────────────────────────────────────────────────────────────────────
//

/// Read-only snapshot of one entry of the contract's per-user stake list.
///
/// Owned and mutated exclusively by the staking contract: created by `stake`,
/// deactivated by a withdrawal. The client re-reads it every refresh and never
/// persists it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakePosition {
    /// Index of this entry in the user's stake list; the argument to the
    /// withdraw functions.
    pub stake_id: u64,

    /// Staked principal in base units.
    pub amount: U256,

    /// UNIX timestamp (seconds) at which the stake was opened.
    pub start_timestamp: u64,

    /// UNIX timestamp (seconds) from which a penalty-free withdrawal is allowed.
    pub unlock_timestamp: u64,

    /// Reward already accounted for (paid or offset) on this stake.
    pub reward_debt: U256,

    /// `false` once the stake has been withdrawn.
    pub active: bool,
}

fn seconds(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl StakePosition {
    pub fn from_contract(stake_id: u64, info: &StakeInfo) -> Self {
        Self {
            stake_id,
            amount: info.amount,
            start_timestamp: seconds(info.timestamp),
            unlock_timestamp: seconds(info.unlockTime),
            reward_debt: info.rewardDebt,
            active: info.active,
        }
    }

    pub fn is_unlocked(&self, now: u64) -> bool {
        now >= self.unlock_timestamp
    }

    pub fn seconds_until_unlock(&self, now: u64) -> u64 {
        self.unlock_timestamp.saturating_sub(now)
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_timestamp)
    }
}
