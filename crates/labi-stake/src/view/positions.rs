use super::{busy_label, format_date};
use crate::{
    rewards::RewardCalculator,
    states::{StakePosition, StakingSnapshot, TokenSnapshot, TxState},
    units,
};

/// One active stake as the positions panel lists it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionView {
    pub stake_id: u64,
    pub amount: String,
    /// Client-side projection, never the contract's figure.
    pub estimated_rewards: String,
    pub staked_on: String,
    pub unlocks_on: String,
    pub countdown: String,
    pub unlocked: bool,
    pub normal_withdraw_label: String,
    pub normal_withdraw_enabled: bool,
    pub emergency_withdraw_enabled: bool,
    /// e.g. `"Receive 90.0000 STAKE (penalty 10.0000)"`
    pub emergency_preview: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StakePositionsView {
    pub positions: Vec<PositionView>,
}

impl StakePositionsView {
    pub fn build(
        token: &TokenSnapshot,
        staking: &StakingSnapshot,
        tx: &TxState,
        now: u64,
        fallback_rate_bps: u64,
        penalty_bps: u64,
    ) -> Self {
        let rate = staking.reward_rate_bps(fallback_rate_bps);
        let positions = staking
            .active_stakes()
            .into_iter()
            .map(|position| {
                PositionView::build(position, token, tx, now, rate, penalty_bps)
            })
            .collect();
        Self { positions }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionView {
    fn build(
        position: &StakePosition,
        token: &TokenSnapshot,
        tx: &TxState,
        now: u64,
        rate_bps: u64,
        penalty_bps: u64,
    ) -> Self {
        let decimals = token.decimals();
        let symbol = token.symbol();
        let busy = tx.is_busy();
        let unlocked = position.is_unlocked(now);
        let projection = RewardCalculator::project(position, rate_bps, now);
        let preview = RewardCalculator::emergency_payout(position.amount, penalty_bps);

        let normal_withdraw_label = match busy_label(tx) {
            Some(label) => label.to_string(),
            None if unlocked => "Normal Withdraw + Rewards".to_string(),
            None => format!("Locked until {}", format_date(position.unlock_timestamp)),
        };

        Self {
            stake_id: position.stake_id,
            amount: format!("{} {}", units::format_amount(position.amount, decimals, 4), symbol),
            estimated_rewards: format!(
                "~{} {}",
                units::format_amount(projection.estimated, decimals, 6),
                symbol
            ),
            staked_on: format_date(position.start_timestamp),
            unlocks_on: format_date(position.unlock_timestamp),
            countdown: RewardCalculator::unlock_countdown(position, now),
            unlocked,
            normal_withdraw_label,
            normal_withdraw_enabled: unlocked && !busy,
            emergency_withdraw_enabled: !busy,
            emergency_preview: format!(
                "Receive {} {} (penalty {})",
                units::format_amount(preview.received, decimals, 4),
                symbol,
                units::format_amount(preview.penalty, decimals, 4)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{units::tokens, SECONDS_PER_DAY, SECONDS_PER_YEAR};
    use alloy_primitives::U256;

    const START: u64 = 1_700_000_000;

    fn staking() -> StakingSnapshot {
        StakingSnapshot {
            stakes: Some(vec![
                StakePosition {
                    stake_id: 0,
                    amount: tokens(100, 18),
                    start_timestamp: START,
                    unlock_timestamp: START + 30 * SECONDS_PER_DAY,
                    reward_debt: U256::ZERO,
                    active: true,
                },
                StakePosition {
                    stake_id: 1,
                    amount: tokens(50, 18),
                    start_timestamp: START,
                    unlock_timestamp: START,
                    reward_debt: U256::ZERO,
                    active: false,
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn lists_active_stakes_only() {
        let view = StakePositionsView::build(
            &TokenSnapshot::default(),
            &staking(),
            &TxState::Idle,
            START,
            100,
            1_000,
        );
        assert_eq!(view.positions.len(), 1);
        let position = &view.positions[0];
        assert_eq!(position.stake_id, 0);
        assert_eq!(position.staked_on, "2023-11-14");
        assert_eq!(position.countdown, "30d 0h");
        assert!(!position.normal_withdraw_enabled);
        assert!(position.emergency_withdraw_enabled);
        assert_eq!(position.normal_withdraw_label, "Locked until 2023-12-14");
        assert_eq!(
            position.emergency_preview,
            "Receive 90.0000 STAKE (penalty 10.0000)"
        );
    }

    #[test]
    fn unlocked_stake_can_be_withdrawn_normally() {
        let now = START + SECONDS_PER_YEAR;
        let view = StakePositionsView::build(
            &TokenSnapshot::default(),
            &staking(),
            &TxState::Idle,
            now,
            100,
            1_000,
        );
        let position = &view.positions[0];
        assert!(position.unlocked);
        assert!(position.normal_withdraw_enabled);
        assert_eq!(position.countdown, "Unlocked");
        // 1% of 100 over a full year
        assert_eq!(position.estimated_rewards, "~1.000000 STAKE");

        let busy = StakePositionsView::build(
            &TokenSnapshot::default(),
            &staking(),
            &TxState::PendingSignature,
            now,
            100,
            1_000,
        );
        assert!(!busy.positions[0].normal_withdraw_enabled);
        assert!(!busy.positions[0].emergency_withdraw_enabled);
    }

    #[test]
    fn no_stakes_is_empty() {
        let view = StakePositionsView::build(
            &TokenSnapshot::default(),
            &StakingSnapshot::default(),
            &TxState::Idle,
            START,
            100,
            1_000,
        );
        assert!(view.is_empty());
    }
}
