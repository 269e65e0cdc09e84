//! # Buuzcoin Merkle Trie
//!
//! The authenticated state structure of the chain: a Merkle trie keyed by
//! strings of lowercase hex nibbles, persisted node-by-node in a
//! content-addressed store (key of every stored entry = SHA3-256 of its
//! bytes).
//!
//! ## Structure
//!
//! - [`TrieNode`]: one node with a 3-bit flag set (`hasChildren`,
//!   `hasExtKey`, `hasValue`), an optional extension key, an opaque value
//!   and up to 16 children referenced *by content hash*, never by owning
//!   pointer. Carries the consensus-critical binary codec.
//! - [`MerkleTrie`]: an arena of hydrated nodes rooted at a single node,
//!   giving `find`/`put` over a lookup closure into the store and a
//!   root-ward flush that re-encodes a touched path.
//!
//! Writes are path-copying: a `put` only ever adds new node bytes under
//! new hashes, so every previously committed root stays readable until it
//! is overwritten at the store boundary.

pub mod errors;
pub mod nibbles;
pub mod node;
pub mod trie;

// Re-exports
pub use errors::TrieError;
pub use node::{flags, TrieNode};
pub use trie::{Lookup, MerkleTrie, NodeId};
