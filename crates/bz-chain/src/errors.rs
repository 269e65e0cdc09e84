//! Chain dispatcher error types.

use thiserror::Error;

use bz_storage::StoreError;
use bz_validation::ValidationError;

/// Errors of chain initialization and block application.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The block does not chain onto the current tip.
    #[error("dispatcher: block cannot be applied: different roots")]
    DifferentRoots,

    /// The block failed a consensus rule; the underlying violation is
    /// attached as the source.
    #[error("dispatcher: malformed block")]
    MalformedBlock(#[source] ValidationError),

    /// Data in local storage is corrupt.
    #[error("dispatcher: corrupt database")]
    CorruptDatabase,

    /// The genesis block failed validation.
    #[error("validation: invalid genesis block")]
    InvalidGenesis(#[source] ValidationError),

    /// The genesis block file does not decode.
    #[error("corrupt genesis block file: {0}")]
    CorruptGenesisFile(#[from] prost::DecodeError),

    /// The genesis block file could not be read.
    #[error("failed to read genesis block file: {0}")]
    GenesisFile(#[from] std::io::Error),

    /// The configured authority public key is not 32 hex-encoded bytes.
    #[error("config: invalid authority public key")]
    InvalidAuthorityKey,

    /// A structural validation failure (store or trie) during apply.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The local store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
