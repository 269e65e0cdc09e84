//! Storage error types.

use thiserror::Error;

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence layer failed.
    #[error("store: database error: {0}")]
    Database(String),

    /// A column family expected at open time is missing.
    #[error("store: missing table '{0}'")]
    MissingTable(&'static str),

    /// A stored record payload does not decode.
    #[error("store: corrupt record: {0}")]
    CorruptRecord(#[from] prost::DecodeError),
}

impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
