//! # Address Derivation
//!
//! An account address is the last 20 bytes of the SHA3-256 digest of the
//! account's Ed25519 public key (SHA3-256/160).

use crate::hashing::sha3_256;

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account address.
pub type Address = [u8; ADDRESS_SIZE];

/// Derive the address of an Ed25519 public key.
pub fn derive_address(public_key: &[u8]) -> Address {
    let digest = sha3_256(public_key);
    let mut address = [0u8; ADDRESS_SIZE];
    address.copy_from_slice(&digest[32 - ADDRESS_SIZE..]);
    address
}
