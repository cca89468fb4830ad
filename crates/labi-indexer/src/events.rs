//! Events emitted by the indexed staking contract.

use crate::error::{IndexerError, Result};
use alloy_primitives::{B256, U64};
use alloy_sol_types::SolEvent;
use labi_stake::rpc::Log;

alloy_sol_types::sol! {
    #[sol(all_derives)]
    interface IStakingEvents {
        event Staked(
            address indexed user,
            uint256 amount,
            uint256 timestamp,
            uint256 newTotalStaked,
            uint256 currentRewardRate
        );
        event Withdrawn(address indexed user, uint256 amount);
        event RewardsClaimed(address indexed user, uint256 rewardAmount);
        event Deposited(address indexed user, uint256 amount, uint256 newUserBalance);
        event StakeWithdrawn(address indexed user, uint256 amount, uint256 remainingBalance);
        event EarlyWithdrawal(
            address indexed user,
            uint256 amount,
            uint256 penaltyAmount,
            uint256 actualReceived
        );
        /// Generic activity marker for an address.
        event User(address indexed user);
    }
}

use IStakingEvents::{
    Deposited, EarlyWithdrawal, RewardsClaimed, StakeWithdrawn, Staked, User, Withdrawn,
};

/// A decoded staking contract event.
pub enum StakingEvent {
    Staked(Staked),
    Withdrawn(Withdrawn),
    RewardsClaimed(RewardsClaimed),
    Deposited(Deposited),
    StakeWithdrawn(StakeWithdrawn),
    EarlyWithdrawal(EarlyWithdrawal),
    User(User),
}

fn decode<E: SolEvent>(log: &Log) -> Result<E> {
    Ok(E::decode_raw_log(log.topics.iter().copied(), &log.data, true)?)
}

impl StakingEvent {
    /// Decodes `log` by its first topic. Logs of other events are
    /// [`IndexerError::UnknownEvent`].
    pub fn decode(log: &Log) -> Result<Self> {
        let topic0 = *log.topics.first().ok_or(IndexerError::IncompleteLog("topics"))?;
        let event = if topic0 == Staked::SIGNATURE_HASH {
            Self::Staked(decode(log)?)
        } else if topic0 == Withdrawn::SIGNATURE_HASH {
            Self::Withdrawn(decode(log)?)
        } else if topic0 == RewardsClaimed::SIGNATURE_HASH {
            Self::RewardsClaimed(decode(log)?)
        } else if topic0 == Deposited::SIGNATURE_HASH {
            Self::Deposited(decode(log)?)
        } else if topic0 == StakeWithdrawn::SIGNATURE_HASH {
            Self::StakeWithdrawn(decode(log)?)
        } else if topic0 == EarlyWithdrawal::SIGNATURE_HASH {
            Self::EarlyWithdrawal(decode(log)?)
        } else if topic0 == User::SIGNATURE_HASH {
            Self::User(decode(log)?)
        } else {
            return Err(IndexerError::UnknownEvent(topic0));
        };
        Ok(event)
    }
}

/// Where and when an event was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventMeta {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    pub log_index: u32,
}

impl EventMeta {
    pub fn from_log(log: &Log, block_timestamp: u64) -> Result<Self> {
        let block_number = log
            .block_number
            .ok_or(IndexerError::IncompleteLog("blockNumber"))?;
        let transaction_hash = log
            .transaction_hash
            .ok_or(IndexerError::IncompleteLog("transactionHash"))?;
        let log_index = log
            .log_index
            .ok_or(IndexerError::IncompleteLog("logIndex"))?;
        if log_index > U64::from(u32::MAX) {
            return Err(IndexerError::IncompleteLog("logIndex within u32"));
        }
        Ok(Self {
            block_number: block_number.to::<u64>(),
            block_timestamp,
            transaction_hash,
            log_index: log_index.to::<u32>(),
        })
    }
}
