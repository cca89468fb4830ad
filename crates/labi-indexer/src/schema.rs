//! Indexed entities.

use crate::events::EventMeta;
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ──────────────────────────────────────────────────────────────────────────────
// Record identity
// ──────────────────────────────────────────────────────────────────────────────
//

/// Identity of an event occurrence: the 32 transaction-hash bytes followed by
/// the log index as 4 little-endian bytes, hex encoded with a `0x` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(transaction_hash: B256, log_index: u32) -> Self {
        let mut bytes = transaction_hash.to_vec();
        bytes.extend_from_slice(&log_index.to_le_bytes());
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&EventMeta> for EventId {
    fn from(meta: &EventMeta) -> Self {
        Self::new(meta.transaction_hash, meta.log_index)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block metadata copied onto every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    #[serde(default)]
    pub log_index: u32,
}

impl BlockRef {
    /// Position of the event in chain order.
    pub fn position(&self) -> (u64, u32) {
        (self.block_number, self.log_index)
    }
}

impl From<&EventMeta> for BlockRef {
    fn from(meta: &EventMeta) -> Self {
        Self {
            block_number: meta.block_number,
            block_timestamp: meta.block_timestamp,
            transaction_hash: meta.transaction_hash,
            log_index: meta.log_index,
        }
    }
}

//
// ──────────────────────────────────────────────────────────────────────────────
// Event records
// ──────────────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Staked,
    Withdrawn,
    RewardsClaimed,
    Deposited,
    StakeWithdrawn,
    EarlyWithdrawal,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Staked,
        RecordKind::Withdrawn,
        RecordKind::RewardsClaimed,
        RecordKind::Deposited,
        RecordKind::StakeWithdrawn,
        RecordKind::EarlyWithdrawal,
    ];
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Staked => "Staked",
            RecordKind::Withdrawn => "Withdrawn",
            RecordKind::RewardsClaimed => "RewardsClaimed",
            RecordKind::Deposited => "Deposited",
            RecordKind::StakeWithdrawn => "StakeWithdrawn",
            RecordKind::EarlyWithdrawal => "EarlyWithdrawal",
        };
        f.write_str(name)
    }
}

/// Event parameters, copied verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordPayload {
    Staked {
        amount: U256,
        timestamp: U256,
        new_total_staked: U256,
        current_reward_rate: U256,
    },
    Withdrawn {
        amount: U256,
    },
    RewardsClaimed {
        reward_amount: U256,
    },
    Deposited {
        amount: U256,
        new_user_balance: U256,
    },
    StakeWithdrawn {
        amount: U256,
        remaining_balance: U256,
    },
    EarlyWithdrawal {
        amount: U256,
        penalty_amount: U256,
        actual_received: U256,
    },
}

impl RecordPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPayload::Staked { .. } => RecordKind::Staked,
            RecordPayload::Withdrawn { .. } => RecordKind::Withdrawn,
            RecordPayload::RewardsClaimed { .. } => RecordKind::RewardsClaimed,
            RecordPayload::Deposited { .. } => RecordKind::Deposited,
            RecordPayload::StakeWithdrawn { .. } => RecordKind::StakeWithdrawn,
            RecordPayload::EarlyWithdrawal { .. } => RecordKind::EarlyWithdrawal,
        }
    }
}

/// One immutable record per event occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub user: Address,
    pub payload: RecordPayload,
    pub block: BlockRef,
}

impl EventRecord {
    pub fn new(meta: &EventMeta, user: Address, payload: RecordPayload) -> Self {
        Self {
            id: EventId::from(meta),
            user,
            payload,
            block: BlockRef::from(meta),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.payload.kind()
    }
}

//
// ──────────────────────────────────────────────────────────────────────────────
// User summary
// ──────────────────────────────────────────────────────────────────────────────
//

/// Per-address summary, created the first time the address is seen and never
/// deleted.
///
/// Counters are initialised to zero on creation and not aggregated from the
/// amount-bearing events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Address,
    pub total_staked: U256,
    pub total_rewards_claimed: U256,
    pub stake_count: U256,
    pub first_stake_timestamp: u64,
    pub last_activity_timestamp: u64,
    pub is_active: bool,
    pub block: BlockRef,
}

impl UserSummary {
    pub fn new(id: Address, meta: &EventMeta) -> Self {
        Self {
            id,
            total_staked: U256::ZERO,
            total_rewards_claimed: U256::ZERO,
            stake_count: U256::ZERO,
            first_stake_timestamp: meta.block_timestamp,
            last_activity_timestamp: meta.block_timestamp,
            is_active: false,
            block: BlockRef::from(meta),
        }
    }

    /// Refreshes the bookkeeping fields from an event strictly after the one
    /// last applied. Returns `false`, leaving the summary as is, for events at
    /// or before that point.
    pub fn touch(&mut self, meta: &EventMeta) -> bool {
        let block = BlockRef::from(meta);
        if block.position() <= self.block.position() {
            return false;
        }
        self.last_activity_timestamp = meta.block_timestamp;
        self.block = block;
        true
    }
}
