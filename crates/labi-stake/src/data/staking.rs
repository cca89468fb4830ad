use crate::{
    error::Result,
    interface::IStakingContract,
    rpc::Provider,
    session::WalletSession,
    states::{StakePosition, StakingSnapshot},
};
use alloy_primitives::{Address, B256, U256};
use std::sync::Arc;

/// Reads and writes against the staking contract for the session's account.
pub struct StakingData<P: Provider> {
    session: Arc<WalletSession<P>>,
}

impl<P: Provider> Clone for StakingData<P> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<P: Provider> StakingData<P> {
    pub fn new(session: Arc<WalletSession<P>>) -> Self {
        Self { session }
    }

    fn staking(&self) -> Address {
        self.session.deployment().staking_contract
    }

    pub fn fetch(&self) -> StakingSnapshot {
        let staking = self.staking();
        let user = self.session.account();
        let session = &self.session;

        let stakes = session
            .read_or_default(staking, &IStakingContract::getUserStakesCall { user })
            .map(|r| {
                r._0.iter()
                    .enumerate()
                    .map(|(id, info)| StakePosition::from_contract(id as u64, info))
                    .collect()
            });

        StakingSnapshot {
            stakes,
            stake_count: session
                .read_or_default(staking, &IStakingContract::getUserStakeCountCall { user })
                .map(|r| r._0),
            pending_rewards: session
                .read_or_default(staking, &IStakingContract::getPendingRewardsCall { user })
                .map(|r| r._0),
            user_total_staked: session
                .read_or_default(staking, &IStakingContract::getUserTotalStakedCall { user })
                .map(|r| r._0),
            total_staked: session
                .read_or_default(staking, &IStakingContract::getTotalStakedCall {})
                .map(|r| r._0),
            reward_rate: session
                .read_or_default(staking, &IStakingContract::getRewardRateCall {})
                .map(|r| r._0),
            apr: session
                .read_or_default(staking, &IStakingContract::getAPRCall {})
                .map(|r| r._0),
            lock_period: session
                .read_or_default(staking, &IStakingContract::getLockPeriodCall {})
                .map(|r| r._0),
        }
    }

    /// The contract's own reward figure for one stake.
    pub fn calculate_rewards(&self, stake_id: u64) -> Option<U256> {
        self.session
            .read_or_default(
                self.staking(),
                &IStakingContract::calculateRewardsCall {
                    user: self.session.account(),
                    stakeId: U256::from(stake_id),
                },
            )
            .map(|r| r._0)
    }

    pub fn contract_balance(&self) -> Option<U256> {
        self.session
            .read_or_default(self.staking(), &IStakingContract::getContractBalanceCall {})
            .map(|r| r._0)
    }

    pub fn staking_token(&self) -> Option<Address> {
        self.session
            .read_or_default(self.staking(), &IStakingContract::getStakingTokenCall {})
            .map(|r| r._0)
    }

    pub fn stake(&self, amount: U256) -> Result<B256> {
        self.session
            .send(self.staking(), &IStakingContract::stakeCall { amount })
    }

    pub fn withdraw(&self, stake_id: u64) -> Result<B256> {
        self.session.send(
            self.staking(),
            &IStakingContract::withdrawCall {
                stakeId: U256::from(stake_id),
            },
        )
    }

    /// Penalty-free exit with rewards; the contract reverts before unlock.
    pub fn normal_withdraw(&self, stake_id: u64) -> Result<B256> {
        self.session.send(
            self.staking(),
            &IStakingContract::normalWithdrawCall {
                stakeId: U256::from(stake_id),
            },
        )
    }

    /// Early exit: principal minus the penalty, unclaimed rewards forfeited.
    pub fn emergency_withdraw(&self, stake_id: u64) -> Result<B256> {
        self.session.send(
            self.staking(),
            &IStakingContract::emergencyWithdrawCall {
                stakeId: U256::from(stake_id),
            },
        )
    }

    pub fn claim_rewards(&self) -> Result<B256> {
        self.session
            .send(self.staking(), &IStakingContract::claimRewardsCall {})
    }
}
