//! # Chain Tip Record
//!
//! The unique extendable head of the chain, persisted under a fixed key
//! in the blockchain table. Unlike blocks and transactions this record is
//! local bookkeeping, not consensus-observable.

/// Last block hash/index and the state root they commit to.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainTip {
    /// Hash of the last applied block.
    #[prost(bytes = "vec", tag = "1")]
    pub last_block_hash: Vec<u8>,
    /// Root hash of the state trie after the last applied block.
    #[prost(bytes = "vec", tag = "2")]
    pub state_merkle_root: Vec<u8>,
    /// Index of the last applied block.
    #[prost(uint64, tag = "3")]
    pub last_block_index: u64,
}
