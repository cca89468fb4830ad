//! Record storage.
//!
//! [`MemoryStore`] holds everything in ordered maps; [`JsonFileStore`] adds a
//! JSON snapshot on disk that is rewritten on every [`Store::flush`].

use crate::{
    error::Result,
    schema::{EventId, EventRecord, RecordKind, UserSummary},
};
use alloy_primitives::Address;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

pub trait Store {
    fn record(&self, kind: RecordKind, id: &EventId) -> Option<&EventRecord>;

    /// Writes `record` unless one with the same kind and id exists. Returns
    /// whether it was written.
    fn insert_record(&mut self, record: EventRecord) -> bool;

    fn records(&self, kind: RecordKind) -> Vec<&EventRecord>;

    fn user(&self, id: &Address) -> Option<&UserSummary>;

    fn save_user(&mut self, summary: UserSummary);

    /// First block not yet indexed.
    fn cursor(&self) -> Option<u64>;

    fn set_cursor(&mut self, next_block: u64);

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    records: BTreeMap<(RecordKind, EventId), EventRecord>,
    users: BTreeMap<Address, UserSummary>,
    cursor: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn users(&self) -> impl Iterator<Item = &UserSummary> {
        self.users.values()
    }
}

impl Store for MemoryStore {
    fn record(&self, kind: RecordKind, id: &EventId) -> Option<&EventRecord> {
        self.records.get(&(kind, id.clone()))
    }

    fn insert_record(&mut self, record: EventRecord) -> bool {
        let key = (record.kind(), record.id.clone());
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, record);
        true
    }

    fn records(&self, kind: RecordKind) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, record)| record)
            .collect()
    }

    fn user(&self, id: &Address) -> Option<&UserSummary> {
        self.users.get(id)
    }

    fn save_user(&mut self, summary: UserSummary) {
        self.users.insert(summary.id, summary);
    }

    fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    fn set_cursor(&mut self, next_block: u64) {
        self.cursor = Some(next_block);
    }
}

#[derive(Default, Serialize, Deserialize)]
struct Snapshot {
    records: Vec<EventRecord>,
    users: Vec<UserSummary>,
    next_block: Option<u64>,
}

impl From<&MemoryStore> for Snapshot {
    fn from(store: &MemoryStore) -> Self {
        Self {
            records: store.records.values().cloned().collect(),
            users: store.users.values().cloned().collect(),
            next_block: store.cursor,
        }
    }
}

impl From<Snapshot> for MemoryStore {
    fn from(snapshot: Snapshot) -> Self {
        let mut store = MemoryStore::new();
        for record in snapshot.records {
            store.insert_record(record);
        }
        for user in snapshot.users {
            store.save_user(user);
        }
        store.cursor = snapshot.next_block;
        store
    }
}

/// [`MemoryStore`] persisted as one JSON document.
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Loads the snapshot at `path`, or starts empty if there is none yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let snapshot: Snapshot = serde_json::from_slice(&fs::read(&path)?)?;
            MemoryStore::from(snapshot)
        } else {
            debug!("no index snapshot at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }
}

impl Store for JsonFileStore {
    fn record(&self, kind: RecordKind, id: &EventId) -> Option<&EventRecord> {
        self.inner.record(kind, id)
    }

    fn insert_record(&mut self, record: EventRecord) -> bool {
        self.inner.insert_record(record)
    }

    fn records(&self, kind: RecordKind) -> Vec<&EventRecord> {
        self.inner.records(kind)
    }

    fn user(&self, id: &Address) -> Option<&UserSummary> {
        self.inner.user(id)
    }

    fn save_user(&mut self, summary: UserSummary) {
        self.inner.save_user(summary)
    }

    fn cursor(&self) -> Option<u64> {
        self.inner.cursor()
    }

    fn set_cursor(&mut self, next_block: u64) {
        self.inner.set_cursor(next_block)
    }

    /// Writes a sibling temp file and renames it over the snapshot.
    fn flush(&mut self) -> Result<()> {
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, serde_json::to_vec_pretty(&Snapshot::from(&self.inner))?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
