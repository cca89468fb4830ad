//! Client-side reward estimates
//!
//! The staking contract owns reward accounting. Everything here is a linear
//! (simple-interest) approximation for display and may drift from the
//! contract's own figure; results are wrapped in [`RewardProjection`] so they
//! cannot be mistaken for an on-chain value.

use crate::{states::StakePosition, BPS_DENOMINATOR, SECONDS_PER_DAY, SECONDS_PER_YEAR};
use alloy_primitives::U256;

/// An estimated, never authoritative, reward amount in base units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RewardProjection {
    pub estimated: U256,
}

/// Outcome of an early exit, as the stake positions panel previews it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmergencyPreview {
    /// Principal returned to the user.
    pub received: U256,
    /// Principal forfeited to the contract.
    pub penalty: U256,
}

/// Stateless container for the projection math, mirroring how the on-chain
/// calculators group their formulas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardCalculator {}

impl RewardCalculator {
    /// `max(0, amount * rate_bps * elapsed / (10000 * SECONDS_PER_YEAR) - reward_debt)`
    ///
    /// Floor division; intermediate products saturate instead of wrapping.
    pub fn projected_reward(
        amount: U256,
        rate_bps: u64,
        elapsed_secs: u64,
        reward_debt: U256,
    ) -> U256 {
        let numerator = amount
            .saturating_mul(U256::from(rate_bps))
            .saturating_mul(U256::from(elapsed_secs));
        let denominator = U256::from(BPS_DENOMINATOR) * U256::from(SECONDS_PER_YEAR);
        (numerator / denominator).saturating_sub(reward_debt)
    }

    /// Projection for one position at `now` (client wall clock).
    pub fn project(position: &StakePosition, rate_bps: u64, now: u64) -> RewardProjection {
        RewardProjection {
            estimated: Self::projected_reward(
                position.amount,
                rate_bps,
                position.elapsed(now),
                position.reward_debt,
            ),
        }
    }

    /// Sum of projections over every active position.
    pub fn project_all<'a, I>(positions: I, rate_bps: u64, now: u64) -> RewardProjection
    where
        I: IntoIterator<Item = &'a StakePosition>,
    {
        let estimated = positions
            .into_iter()
            .filter(|p| p.active)
            .map(|p| Self::project(p, rate_bps, now).estimated)
            .fold(U256::ZERO, |acc, r| acc.saturating_add(r));
        RewardProjection { estimated }
    }

    /// Approximate reward earned per day on `total_staked`.
    pub fn daily_earnings(total_staked: U256, rate_bps: u64) -> RewardProjection {
        RewardProjection {
            estimated: Self::projected_reward(total_staked, rate_bps, SECONDS_PER_DAY, U256::ZERO),
        }
    }

    /// Split of `amount` on early exit with a penalty in basis points.
    pub fn emergency_payout(amount: U256, penalty_bps: u64) -> EmergencyPreview {
        let penalty_bps = penalty_bps.min(BPS_DENOMINATOR);
        let penalty = amount.saturating_mul(U256::from(penalty_bps)) / U256::from(BPS_DENOMINATOR);
        EmergencyPreview {
            received: amount - penalty,
            penalty,
        }
    }

    /// `"{d}d {h}h"` until unlock, or `"Unlocked"` once reached.
    pub fn unlock_countdown(position: &StakePosition, now: u64) -> String {
        if position.is_unlocked(now) {
            return "Unlocked".to_string();
        }
        let remaining = position.seconds_until_unlock(now);
        let days = remaining / SECONDS_PER_DAY;
        let hours = (remaining % SECONDS_PER_DAY) / 3_600;
        format!("{}d {}h", days, hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::tokens;
    use proptest::prelude::*;

    fn position(amount: U256, start: u64, unlock: u64, debt: U256) -> StakePosition {
        StakePosition {
            stake_id: 0,
            amount,
            start_timestamp: start,
            unlock_timestamp: unlock,
            reward_debt: debt,
            active: true,
        }
    }

    #[test]
    fn one_year_at_one_percent() {
        let amount = tokens(1_000, 18);
        let reward = RewardCalculator::projected_reward(amount, 100, SECONDS_PER_YEAR, U256::ZERO);
        assert_eq!(reward, tokens(10, 18));
    }

    #[test]
    fn nothing_accrues_at_time_zero() {
        let reward = RewardCalculator::projected_reward(tokens(1_000, 18), 100, 0, U256::ZERO);
        assert_eq!(reward, U256::ZERO);
    }

    #[test]
    fn debt_above_raw_reward_clamps_to_zero() {
        let amount = tokens(1_000, 18);
        let raw = RewardCalculator::projected_reward(amount, 100, SECONDS_PER_YEAR, U256::ZERO);
        assert_eq!(
            RewardCalculator::projected_reward(amount, 100, SECONDS_PER_YEAR, raw),
            U256::ZERO
        );
        assert_eq!(
            RewardCalculator::projected_reward(
                amount,
                100,
                SECONDS_PER_YEAR,
                raw + U256::from(1u64)
            ),
            U256::ZERO
        );
    }

    #[test]
    fn projection_uses_elapsed_since_start() {
        let p = position(tokens(1_000, 18), 1_000, 2_000, U256::ZERO);
        let projected = RewardCalculator::project(&p, 100, 1_000 + SECONDS_PER_YEAR);
        assert_eq!(projected.estimated, tokens(10, 18));
        // clock behind the recorded start
        assert_eq!(RewardCalculator::project(&p, 100, 10).estimated, U256::ZERO);
    }

    #[test]
    fn inactive_positions_do_not_project() {
        let mut closed = position(tokens(1_000, 18), 0, 0, U256::ZERO);
        closed.active = false;
        let open = position(tokens(1_000, 18), 0, 0, U256::ZERO);
        let total = RewardCalculator::project_all([&closed, &open], 100, SECONDS_PER_YEAR);
        assert_eq!(total.estimated, tokens(10, 18));
    }

    #[test]
    fn emergency_exit_keeps_ninety_percent() {
        let preview = RewardCalculator::emergency_payout(tokens(100, 18), 1_000);
        assert_eq!(preview.received, tokens(90, 18));
        assert_eq!(preview.penalty, tokens(10, 18));
    }

    #[test]
    fn countdown_formats_days_and_hours() {
        let p = position(U256::ZERO, 0, 2 * SECONDS_PER_DAY + 5 * 3_600 + 59, U256::ZERO);
        assert_eq!(RewardCalculator::unlock_countdown(&p, 0), "2d 5h");
        assert_eq!(
            RewardCalculator::unlock_countdown(&p, 3 * SECONDS_PER_DAY),
            "Unlocked"
        );
    }

    #[test]
    fn daily_earnings_is_a_365th_of_yearly() {
        let daily = RewardCalculator::daily_earnings(tokens(365, 18), 100);
        assert_eq!(daily.estimated, tokens(1, 18) / U256::from(100u64));
    }

    proptest! {
        #[test]
        fn projection_is_monotonic_in_time(
            amount in 0u128..u128::MAX,
            rate in 0u64..20_000,
            t0 in 0u64..(10 * SECONDS_PER_YEAR),
            dt in 0u64..SECONDS_PER_YEAR,
        ) {
            let amount = U256::from(amount);
            let earlier = RewardCalculator::projected_reward(amount, rate, t0, U256::ZERO);
            let later = RewardCalculator::projected_reward(amount, rate, t0 + dt, U256::ZERO);
            prop_assert!(later >= earlier);
        }

        #[test]
        fn projection_never_exceeds_raw_reward(
            amount in 0u128..u128::MAX,
            rate in 0u64..20_000,
            elapsed in 0u64..(10 * SECONDS_PER_YEAR),
            debt in 0u128..u128::MAX,
        ) {
            let amount = U256::from(amount);
            let raw = RewardCalculator::projected_reward(amount, rate, elapsed, U256::ZERO);
            let net = RewardCalculator::projected_reward(amount, rate, elapsed, U256::from(debt));
            prop_assert!(net <= raw);
        }

        #[test]
        fn emergency_split_conserves_principal(amount in 0u128..u128::MAX, bps in 0u64..20_000) {
            let amount = U256::from(amount);
            let preview = RewardCalculator::emergency_payout(amount, bps);
            prop_assert_eq!(preview.received + preview.penalty, amount);
        }
    }
}
