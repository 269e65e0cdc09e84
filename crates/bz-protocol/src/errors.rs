//! Protocol error types.

use thiserror::Error;

/// Errors of record access and decoding.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// State trie access failed.
    #[error(transparent)]
    Trie(#[from] bz_merkle_trie::TrieError),

    /// A stored record payload does not decode.
    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] prost::DecodeError),
}
