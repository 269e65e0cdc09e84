//! # Block Record
//!
//! The block hash is calculated over the block header in the following
//! binary layout, all numbers little-endian:
//!
//! ```text
//! version          - 4 bytes
//! index            - 8 bytes
//! timestamp        - 8 bytes (signed, unix seconds)
//! prev block hash  - 32 bytes
//! tx merkle root   - 32 bytes
//! state merkle root- 32 bytes
//! beneficiary      - 20 bytes
//! additional data  - 1 byte length (low 8 bits) + bytes
//! ```
//!
//! The proof data, signature and tx hash list ride along in the stored
//! record but are not part of the hash preimage.

use bz_crypto::{sha3_256, Hash};

/// A block as stored and gossiped.
///
/// `signature` is 96 bytes on a well-formed block: the 64-byte Ed25519
/// signature over the block hash followed by the signer's 32-byte public
/// key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    /// Block format version.
    #[prost(uint32, tag = "1")]
    pub version: u32,
    /// Height of the block; the genesis block has index 0.
    #[prost(uint64, tag = "2")]
    pub index: u64,
    /// Creation time in unix seconds.
    #[prost(int64, tag = "3")]
    pub timestamp: i64,
    /// Hash of the predecessor (all zero for the genesis block).
    #[prost(bytes = "vec", tag = "4")]
    pub prev_block_hash: Vec<u8>,
    /// Merkle root over `tx_hashes`.
    #[prost(bytes = "vec", tag = "5")]
    pub tx_merkle_root: Vec<u8>,
    /// Root hash of the state trie after applying this block.
    #[prost(bytes = "vec", tag = "6")]
    pub state_merkle_root: Vec<u8>,
    /// Address credited with the block reward and all fees.
    #[prost(bytes = "vec", tag = "7")]
    pub beneficiary: Vec<u8>,
    /// Free-form payload, capped at 32 bytes by validation.
    #[prost(bytes = "vec", tag = "8")]
    pub additional_data: Vec<u8>,
    /// Proof-algorithm material (consensus-rule specific).
    #[prost(bytes = "vec", tag = "9")]
    pub proof_data: Vec<u8>,
    /// Block signature: signature(64) || public key(32).
    #[prost(bytes = "vec", tag = "10")]
    pub signature: Vec<u8>,
    /// Hashes of the transactions applied by this block, in order.
    #[prost(bytes = "vec", repeated, tag = "11")]
    pub tx_hashes: Vec<Vec<u8>>,
}

impl Block {
    /// The block header in its canonical binary format.
    pub fn header(&self) -> Vec<u8> {
        let header_length = 4 + 8 + 8 + 32 + 32 + 32 + 20 + 1 + self.additional_data.len();

        let mut header = Vec::with_capacity(header_length);
        header.extend_from_slice(&self.version.to_le_bytes());
        header.extend_from_slice(&self.index.to_le_bytes());
        header.extend_from_slice(&self.timestamp.to_le_bytes());

        header.extend_from_slice(&self.prev_block_hash);
        header.extend_from_slice(&self.tx_merkle_root);
        header.extend_from_slice(&self.state_merkle_root);
        header.extend_from_slice(&self.beneficiary);

        header.push((self.additional_data.len() & 0xFF) as u8);
        header.extend_from_slice(&self.additional_data);

        header
    }

    /// Hash of the block, calculated over its header.
    pub fn hash(&self) -> Hash {
        sha3_256(&self.header())
    }
}
