//! Trie error types.

use thiserror::Error;

/// Merkle trie errors.
#[derive(Debug, Error)]
pub enum TrieError {
    /// A node's binary representation is malformed (truncated or with
    /// inconsistent length fields).
    #[error("merkle trie: corrupt node data")]
    CorruptData,

    /// A referenced child hash has no decodable entry in the store.
    /// Fatal: the store no longer covers a committed root.
    #[error("merkle trie: corrupt data source")]
    CorruptSource,

    /// The lookup into the backing store itself failed.
    #[error("merkle trie: data source: {0}")]
    Source(String),
}
