use super::{busy_label, Notice};
use crate::{
    rewards::RewardCalculator,
    states::{StakingSnapshot, TokenSnapshot, TxState},
    units,
};

/// Rewards dashboard. `pending` is the contract's figure; `daily_estimate` is a
/// client projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardsView {
    pub symbol: String,
    pub pending: String,
    pub daily_estimate: String,
    pub has_pending: bool,
    pub has_stakes: bool,
    pub user_total_staked: String,
    pub claim_label: String,
    pub claim_enabled: bool,
    pub notice: Option<Notice>,
}

impl RewardsView {
    pub fn build(
        token: &TokenSnapshot,
        staking: &StakingSnapshot,
        tx: &TxState,
        fallback_rate_bps: u64,
    ) -> Self {
        let decimals = token.decimals();
        let pending = staking.pending_rewards_or_zero();
        let staked = staking.user_total_staked_or_zero();
        let has_pending = !pending.is_zero();
        let daily =
            RewardCalculator::daily_earnings(staked, staking.reward_rate_bps(fallback_rate_bps));

        let claim_label = busy_label(tx)
            .unwrap_or(if has_pending {
                "Claim Rewards"
            } else {
                "No Rewards Yet"
            })
            .to_string();
        let notice = match tx {
            TxState::Confirmed(_) => Some(Notice::success("Rewards claimed successfully!")),
            TxState::Failed(failure) => Some(Notice::error(failure.to_string())),
            _ => None,
        };

        Self {
            symbol: token.symbol().to_string(),
            pending: units::format_amount(pending, decimals, 6),
            daily_estimate: units::format_amount(daily.estimated, decimals, 6),
            has_pending,
            has_stakes: !staked.is_zero(),
            user_total_staked: units::format_amount(staked, decimals, 4),
            claim_label,
            claim_enabled: has_pending && !tx.is_busy(),
            notice,
        }
    }
}
