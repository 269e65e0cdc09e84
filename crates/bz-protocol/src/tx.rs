//! # Transaction Record
//!
//! The transaction hash is calculated over its binary data in the
//! following layout, all numbers little-endian:
//!
//! ```text
//! version       - 4 bytes
//! from          - 20 bytes
//! nonce         - 8 bytes
//! to            - 20 bytes
//! amount        - 8 bytes
//! fee           - 8 bytes
//! optional data - 4 byte length + bytes
//! gas limit     - 8 bytes
//! gas price     - 8 bytes
//! ```

use bz_crypto::{sha3_256, Hash};

/// A transfer transaction.
///
/// `signature` is 96 bytes on a well-formed transaction: the 64-byte
/// Ed25519 signature over the transaction hash followed by the sender's
/// 32-byte public key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tx {
    /// Transaction format version.
    #[prost(uint32, tag = "1")]
    pub version: u32,
    /// Sender address (20 bytes).
    #[prost(bytes = "vec", tag = "2")]
    pub from: Vec<u8>,
    /// Sender-chosen nonce; must exceed the account's out-tx counter.
    #[prost(uint64, tag = "3")]
    pub nonce: u64,
    /// Recipient address (20 bytes).
    #[prost(bytes = "vec", tag = "4")]
    pub to: Vec<u8>,
    /// Transferred amount.
    #[prost(uint64, tag = "5")]
    pub amount: u64,
    /// Flat fee paid to the block beneficiary.
    #[prost(uint64, tag = "6")]
    pub fee: u64,
    /// Free-form payload; each byte costs extra gas.
    #[prost(bytes = "vec", tag = "7")]
    pub optional_data: Vec<u8>,
    /// Upper bound on gas the sender accepts to burn.
    #[prost(uint64, tag = "8")]
    pub gas_limit: u64,
    /// Price per gas unit.
    #[prost(uint64, tag = "9")]
    pub gas_price: u64,
    /// Hash over the binary data, as claimed by the sender.
    #[prost(bytes = "vec", tag = "10")]
    pub hash: Vec<u8>,
    /// Transaction signature: signature(64) || public key(32).
    #[prost(bytes = "vec", tag = "11")]
    pub signature: Vec<u8>,
}

impl Tx {
    /// The transaction in its canonical binary format (hash preimage).
    pub fn binary_data(&self) -> Vec<u8> {
        let data_length = 4 + 20 + 8 + 20 + 8 + 8 + 4 + self.optional_data.len() + 8 + 8;

        let mut data = Vec::with_capacity(data_length);
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&self.from);
        data.extend_from_slice(&self.nonce.to_le_bytes());
        data.extend_from_slice(&self.to);
        data.extend_from_slice(&self.amount.to_le_bytes());
        data.extend_from_slice(&self.fee.to_le_bytes());

        data.extend_from_slice(&(self.optional_data.len() as u32).to_le_bytes());
        data.extend_from_slice(&self.optional_data);

        data.extend_from_slice(&self.gas_limit.to_le_bytes());
        data.extend_from_slice(&self.gas_price.to_le_bytes());
        data
    }

    /// Hash of the transaction, calculated over its binary data.
    pub fn calculate_hash(&self) -> Hash {
        sha3_256(&self.binary_data())
    }
}
