//! # SHA3-256 Hashing
//!
//! The single hash primitive of the chain. Block hashes, transaction
//! hashes, trie node content hashes and address derivation all go through
//! SHA3-256 (not Keccak-256: the FIPS-202 padding variant).

use sha3::{Digest, Sha3_256};

/// SHA3-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Size of a hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Hash data with SHA3-256 (one-shot).
pub fn sha3_256(data: &[u8]) -> Hash {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash the concatenation of multiple inputs.
pub fn sha3_256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha3_256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}
