//! # Buuzcoin Protocol - Consensus Records and Byte Layouts
//!
//! The records whose bytes define consensus identity: blocks,
//! transactions, account states and the chain tip, together with their
//! hash preimages and the transaction Merkle root.
//!
//! Two encodings coexist deliberately:
//!
//! - **Hash preimages** (block header, transaction binary data, trie node
//!   layout) are hand-packed little-endian and must be reproduced
//!   bit-for-bit - they feed SHA3-256 and any deviation is a fork.
//! - **Record payloads** (stored blocks/transactions, account records in
//!   trie leaves, the tip record) travel as protobuf messages.

pub mod account;
pub mod block;
pub mod errors;
pub mod merkle;
pub mod tip;
pub mod tx;

// Re-exports
pub use account::AccountState;
pub use block::Block;
pub use errors::ProtocolError;
pub use merkle::calculate_merkle_root;
pub use tip::ChainTip;
pub use tx::Tx;
