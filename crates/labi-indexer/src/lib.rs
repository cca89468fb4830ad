//! Off-chain indexer for the staking contract's events.
//!
//! Every amount-bearing event becomes one immutable record keyed by its
//! `(transaction hash, log index)`; the generic `User` event maintains a
//! per-address summary. [`runner::Indexer`] feeds the handlers from
//! `eth_getLogs`, and [`query::SubgraphClient`] reads a hosted deployment of the
//! same mappings.

pub mod error;
pub mod events;
pub mod mappings;
pub mod query;
pub mod runner;
pub mod schema;
pub mod store;

pub use error::{IndexerError, Result};
pub use runner::{IndexStats, Indexer};
pub use store::{JsonFileStore, MemoryStore, Store};
