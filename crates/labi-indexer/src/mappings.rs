//! Event handlers: one per event type.

use crate::{
    events::{EventMeta, IStakingEvents, StakingEvent},
    schema::{EventRecord, RecordPayload, UserSummary},
    store::Store,
};
use alloy_primitives::Address;
use log::debug;

/// What a handler did with its event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Recorded,
    /// The record already existed; nothing was written.
    Replayed,
    UserCreated,
    UserUpdated,
}

pub fn handle_event<S: Store>(store: &mut S, event: &StakingEvent, meta: &EventMeta) -> Outcome {
    match event {
        StakingEvent::Staked(e) => handle_staked(store, e, meta),
        StakingEvent::Withdrawn(e) => handle_withdrawn(store, e, meta),
        StakingEvent::RewardsClaimed(e) => handle_rewards_claimed(store, e, meta),
        StakingEvent::Deposited(e) => handle_deposited(store, e, meta),
        StakingEvent::StakeWithdrawn(e) => handle_stake_withdrawn(store, e, meta),
        StakingEvent::EarlyWithdrawal(e) => handle_early_withdrawal(store, e, meta),
        StakingEvent::User(e) => handle_user(store, e.user, meta),
    }
}

fn save<S: Store>(store: &mut S, record: EventRecord) -> Outcome {
    let (kind, id) = (record.kind(), record.id.clone());
    if store.insert_record(record) {
        Outcome::Recorded
    } else {
        debug!("{} {} already indexed", kind, id);
        Outcome::Replayed
    }
}

pub fn handle_staked<S: Store>(
    store: &mut S,
    event: &IStakingEvents::Staked,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::Staked {
        amount: event.amount,
        timestamp: event.timestamp,
        new_total_staked: event.newTotalStaked,
        current_reward_rate: event.currentRewardRate,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

pub fn handle_withdrawn<S: Store>(
    store: &mut S,
    event: &IStakingEvents::Withdrawn,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::Withdrawn {
        amount: event.amount,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

pub fn handle_rewards_claimed<S: Store>(
    store: &mut S,
    event: &IStakingEvents::RewardsClaimed,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::RewardsClaimed {
        reward_amount: event.rewardAmount,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

pub fn handle_deposited<S: Store>(
    store: &mut S,
    event: &IStakingEvents::Deposited,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::Deposited {
        amount: event.amount,
        new_user_balance: event.newUserBalance,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

pub fn handle_stake_withdrawn<S: Store>(
    store: &mut S,
    event: &IStakingEvents::StakeWithdrawn,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::StakeWithdrawn {
        amount: event.amount,
        remaining_balance: event.remainingBalance,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

pub fn handle_early_withdrawal<S: Store>(
    store: &mut S,
    event: &IStakingEvents::EarlyWithdrawal,
    meta: &EventMeta,
) -> Outcome {
    let payload = RecordPayload::EarlyWithdrawal {
        amount: event.amount,
        penalty_amount: event.penaltyAmount,
        actual_received: event.actualReceived,
    };
    save(store, EventRecord::new(meta, event.user, payload))
}

/// Loads or creates the summary for `user`. Counters and the first-seen
/// timestamp are set only on creation; later events refresh bookkeeping and
/// events at or before the last applied one are ignored.
pub fn handle_user<S: Store>(store: &mut S, user: Address, meta: &EventMeta) -> Outcome {
    match store.user(&user).cloned() {
        Some(mut summary) => {
            if !summary.touch(meta) {
                debug!("user event for {} at block {} already applied", user, meta.block_number);
                return Outcome::Replayed;
            }
            store.save_user(summary);
            Outcome::UserUpdated
        }
        None => {
            store.save_user(UserSummary::new(user, meta));
            Outcome::UserCreated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::{EventId, RecordKind},
        store::MemoryStore,
    };
    use alloy_primitives::{B256, U256};

    const USER: Address = Address::repeat_byte(0x11);

    fn meta(tx: u8, log_index: u32, timestamp: u64) -> EventMeta {
        EventMeta {
            block_number: timestamp / 12,
            block_timestamp: timestamp,
            transaction_hash: B256::repeat_byte(tx),
            log_index,
        }
    }

    fn claimed(amount: u64) -> IStakingEvents::RewardsClaimed {
        IStakingEvents::RewardsClaimed {
            user: USER,
            rewardAmount: U256::from(amount),
        }
    }

    #[test]
    fn replay_does_not_duplicate() {
        let mut store = MemoryStore::new();
        let event = StakingEvent::RewardsClaimed(claimed(5));
        assert_eq!(
            handle_event(&mut store, &event, &meta(1, 0, 1_000)),
            Outcome::Recorded
        );
        assert_eq!(
            handle_event(&mut store, &event, &meta(1, 0, 1_000)),
            Outcome::Replayed
        );
        // same transaction, next log
        assert_eq!(
            handle_event(&mut store, &event, &meta(1, 1, 1_000)),
            Outcome::Recorded
        );
        assert_eq!(store.records(RecordKind::RewardsClaimed).len(), 2);
    }

    #[test]
    fn fields_are_copied_verbatim() {
        let mut store = MemoryStore::new();
        let event = IStakingEvents::EarlyWithdrawal {
            user: USER,
            amount: U256::from(100u64),
            penaltyAmount: U256::from(10u64),
            actualReceived: U256::from(90u64),
        };
        handle_early_withdrawal(&mut store, &event, &meta(2, 3, 2_400));

        let record = store
            .record(
                RecordKind::EarlyWithdrawal,
                &EventId::new(B256::repeat_byte(2), 3),
            )
            .unwrap();
        assert_eq!(record.user, USER);
        assert_eq!(record.block.block_number, 200);
        assert_eq!(record.block.block_timestamp, 2_400);
        assert_eq!(
            record.payload,
            RecordPayload::EarlyWithdrawal {
                amount: U256::from(100u64),
                penalty_amount: U256::from(10u64),
                actual_received: U256::from(90u64),
            }
        );
    }

    #[test]
    fn user_summary_is_initialised_once() {
        let mut store = MemoryStore::new();
        assert_eq!(
            handle_user(&mut store, USER, &meta(1, 0, 1_000)),
            Outcome::UserCreated
        );
        let mut summary = store.user(&USER).cloned().unwrap();
        assert_eq!(summary.stake_count, U256::ZERO);
        assert!(!summary.is_active);

        // a later write elsewhere must survive the next touch
        summary.stake_count = U256::from(3u64);
        store.save_user(summary);

        assert_eq!(
            handle_user(&mut store, USER, &meta(9, 4, 5_000)),
            Outcome::UserUpdated
        );
        let summary = store.user(&USER).unwrap();
        assert_eq!(summary.stake_count, U256::from(3u64));
        assert_eq!(summary.first_stake_timestamp, 1_000);
        assert_eq!(summary.last_activity_timestamp, 5_000);
        assert_eq!(summary.block.transaction_hash, B256::repeat_byte(9));
    }

    #[test]
    fn older_user_events_leave_the_summary_alone() {
        let mut store = MemoryStore::new();
        handle_user(&mut store, USER, &meta(1, 0, 1_000));
        handle_user(&mut store, USER, &meta(9, 4, 5_000));

        assert_eq!(
            handle_user(&mut store, USER, &meta(1, 0, 1_000)),
            Outcome::Replayed
        );
        assert_eq!(
            handle_user(&mut store, USER, &meta(9, 4, 5_000)),
            Outcome::Replayed
        );
        let summary = store.user(&USER).unwrap();
        assert_eq!(summary.last_activity_timestamp, 5_000);
        assert_eq!(summary.block.block_number, 416);
        assert_eq!(summary.block.transaction_hash, B256::repeat_byte(9));
    }

    #[test]
    fn amount_events_do_not_aggregate_into_the_summary() {
        let mut store = MemoryStore::new();
        handle_user(&mut store, USER, &meta(1, 0, 1_000));
        handle_rewards_claimed(&mut store, &claimed(50), &meta(2, 0, 1_200));
        assert_eq!(
            store.user(&USER).unwrap().total_rewards_claimed,
            U256::ZERO
        );
    }
}
