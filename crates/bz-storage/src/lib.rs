//! # Buuzcoin Storage - Local Persistence
//!
//! RocksDB-backed storage for the chain core, split over five logical
//! tables (column families): `node`, `state`, `wallets`, `blockchain`
//! and `transactions`.
//!
//! The store exposes exactly two transaction shapes:
//!
//! - [`LocalStore::view`]: reads through a snapshot;
//! - [`LocalStore::update`]: a write transaction that commits when the
//!   closure returns `Ok` and rolls back when it returns `Err`.
//!
//! On top of that sit the chain accessors (blocks and transactions by
//! hash, the chain tip under its fixed key) and the state-trie adapter:
//! a lookup closure for trie hydration and the root-ward
//! write-if-absent persistence of updated trie paths.

pub mod chain;
pub mod errors;
pub mod store;
pub mod trie;

// Re-exports
pub use chain::CHAIN_STATE_KEY;
pub use errors::StoreError;
pub use store::{LocalStore, ReadTxn, Table, WriteTxn};
pub use trie::save_trie;
