use crate::{
    states::{StakingSnapshot, TokenSnapshot},
    units, SECONDS_PER_DAY,
};

/// Protocol and user totals shown above everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakingStatsView {
    pub symbol: String,
    pub user_total_staked: String,
    pub total_staked: String,
    pub apr: String,
    pub lock_period: String,
    pub emergency_penalty: String,
}

impl StakingStatsView {
    pub fn build(
        token: &TokenSnapshot,
        staking: &StakingSnapshot,
        fallback_rate_bps: u64,
        penalty_bps: u64,
    ) -> Self {
        let decimals = token.decimals();
        // the contract quotes APR in whole percent; without it, derive from the rate
        let apr = match staking.apr_percent() {
            0 => {
                let bps = staking.reward_rate_bps(fallback_rate_bps);
                format!("{}.{:02}%", bps / 100, bps % 100)
            }
            percent => format!("{}.00%", percent),
        };
        Self {
            symbol: token.symbol().to_string(),
            user_total_staked: units::format_amount(
                staking.user_total_staked_or_zero(),
                decimals,
                4,
            ),
            total_staked: units::format_amount(staking.total_staked_or_zero(), decimals, 4),
            apr,
            lock_period: format!("{} days", staking.lock_period_secs() / SECONDS_PER_DAY),
            emergency_penalty: format!(
                "{}.{:02}% of staked amount",
                penalty_bps / 100,
                penalty_bps % 100
            ),
        }
    }
}
