//! # Buuzcoin Crypto - Chain Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA3-256 | Block/tx/trie-node content hashes |
//! | `signatures` | Ed25519 | Block and transaction signing |
//! | `address` | SHA3-256/160 | Account address derivation |
//!
//! Every hash mentioned anywhere in the chain core is SHA3-256 and every
//! signature is Ed25519; the address of a public key is the last 20 bytes
//! of its SHA3-256 digest.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use address::{derive_address, Address, ADDRESS_SIZE};
pub use errors::CryptoError;
pub use hashing::{sha3_256, sha3_256_many, Hash, HASH_SIZE};
pub use signatures::{
    verify_raw, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_SIZE,
    SIGNATURE_SIZE,
};
