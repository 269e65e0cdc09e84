//! Validation error types.
//!
//! Rule violations are small, data-free kinds; anything carrying a
//! payload here would end up in peer-visible rejection paths. Structural
//! failures of the store or of record decoding wrap the underlying error
//! and abort the operation instead of producing a verdict.

use thiserror::Error;

/// Transaction rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TxError {
    /// Transaction version is newer than this implementation supports.
    #[error("validation: unsupported transaction")]
    Unsupported,

    /// Structural rule not met (field sizes, gas price floor, signature).
    #[error("validation: malformed transaction data")]
    Malformed,

    /// Claimed hash does not match the hash of the binary data.
    #[error("validation: invalid transaction hash")]
    InvalidHash,

    /// Evaluating the transaction needs more gas than its limit.
    #[error("validation: insufficient gas")]
    InsufficientGas,

    /// Sender balance does not cover amount, fee and gas.
    #[error("validation: insufficient funds")]
    InsufficientFunds,

    /// Nonce replay: the nonce does not exceed the account's counter.
    #[error("validation: rejected transaction")]
    Rejected,
}

/// Block rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Block version is newer than this implementation supports.
    #[error("validation: unsupported block version")]
    VersionUnsupported,

    /// Structural rule not met (field sizes, proof data, signature).
    #[error("validation: malformed block data")]
    Malformed,

    /// Previous-block hash does not match the expected predecessor.
    #[error("validation: invalid block hash")]
    InvalidHash,

    /// Timestamp is in the future or precedes the predecessor.
    #[error("validation: invalid timestamp")]
    InvalidTimestamp,

    /// Merkle root does not match the one calculated over the tx hashes.
    #[error("validation: invalid merkle root")]
    InvalidMerkleRoot,

    /// Index does not extend the predecessor by one.
    #[error("validation: invalid block index")]
    InvalidIndex,
}

/// Any failure surfaced by the validation layer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A transaction rule was violated.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// A block rule was violated.
    #[error(transparent)]
    Block(#[from] BlockError),

    /// A stored record could not be read back.
    #[error(transparent)]
    Record(#[from] bz_protocol::ProtocolError),

    /// The state trie or its backing store failed.
    #[error(transparent)]
    Trie(#[from] bz_merkle_trie::TrieError),
}
