use crate::{
    error::{IndexerError, Result},
    events::{EventMeta, StakingEvent},
    mappings::{self, Outcome},
    store::Store,
};
use alloy_primitives::Address;
use labi_stake::rpc::{EthApi, LogFilter, Provider};
use log::{debug, info, warn};
use std::collections::{hash_map::Entry, HashMap};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub recorded: usize,
    pub replayed: usize,
    pub users: usize,
    pub skipped: usize,
    /// First block left unindexed.
    pub next_block: u64,
}

/// Polls the staking contract's logs and feeds them to the handlers.
///
/// Delivery is at-least-once: the cursor moves only after a whole block range
/// has been handled and flushed, so a crash mid-range replays that range and
/// the write-once records absorb the duplicates.
pub struct Indexer<P: Provider, S: Store> {
    provider: P,
    contract: Address,
    store: S,
    start_block: u64,
    batch_size: u64,
}

impl<P: Provider, S: Store> Indexer<P, S> {
    pub fn new(
        provider: P,
        contract: Address,
        store: S,
        start_block: u64,
        batch_size: u64,
    ) -> Self {
        Self {
            provider,
            contract,
            store,
            start_block,
            batch_size: batch_size.max(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn next_block(&self) -> u64 {
        self.store.cursor().unwrap_or(self.start_block)
    }

    /// Restarts indexing from `block` on the next sync.
    pub fn rewind(&mut self, block: u64) {
        self.store.set_cursor(block);
    }

    /// Indexes every block from the cursor through `to_block`, or through the
    /// chain head when `None`.
    pub fn sync(&mut self, to_block: Option<u64>) -> Result<IndexStats> {
        let head = match to_block {
            Some(block) => block,
            None => self.provider.block_number()?,
        };
        let mut stats = IndexStats {
            next_block: self.next_block(),
            ..Default::default()
        };

        while stats.next_block <= head {
            let from = stats.next_block;
            let to = from.saturating_add(self.batch_size - 1).min(head);
            self.index_range(from, to, &mut stats)?;
            let next = to.checked_add(1);
            self.store.set_cursor(next.unwrap_or(to));
            self.store.flush()?;
            match next {
                Some(next) => stats.next_block = next,
                None => {
                    stats.next_block = to;
                    break;
                }
            }
        }
        Ok(stats)
    }

    fn index_range(&mut self, from: u64, to: u64, stats: &mut IndexStats) -> Result<()> {
        let mut logs = self
            .provider
            .logs(&LogFilter::new(self.contract, from, to))?;
        logs.retain(|log| !log.removed);
        logs.sort_by_key(|log| (log.block_number, log.log_index));

        let mut timestamps = HashMap::new();
        for log in &logs {
            let number = log
                .block_number
                .ok_or(IndexerError::IncompleteLog("blockNumber"))?
                .to::<u64>();
            let timestamp = match timestamps.entry(number) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => *entry.insert(
                    self.provider
                        .block_timestamp(number)?
                        .ok_or(IndexerError::MissingBlock(number))?,
                ),
            };
            let meta = EventMeta::from_log(log, timestamp)?;

            let event = match StakingEvent::decode(log) {
                Ok(event) => event,
                Err(IndexerError::UnknownEvent(topic)) => {
                    debug!("skipping log with topic {} in block {}", topic, number);
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("undecodable log in block {}: {}", number, e);
                    stats.skipped += 1;
                    continue;
                }
            };
            match mappings::handle_event(&mut self.store, &event, &meta) {
                Outcome::Recorded => stats.recorded += 1,
                Outcome::Replayed => stats.replayed += 1,
                Outcome::UserCreated | Outcome::UserUpdated => stats.users += 1,
            }
        }
        info!("indexed blocks {}..={}: {} logs", from, to, logs.len());
        Ok(())
    }
}
