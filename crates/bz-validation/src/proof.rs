//! # Proof Algorithm
//!
//! After a block's data is validated it must also satisfy the network's
//! consensus rule - Proof-of-Work, Proof-of-Stake or similar. That rule
//! is pluggable behind [`ProofAlgorithm`]; the variant shipped here is
//! the single-authority signature used by testnet v1.

use bz_crypto::{
    derive_address, sha3_256_many, verify_raw, PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
};
use bz_protocol::Block;

use crate::errors::ValidationError;

/// Abstract block verification algorithm.
///
/// `Ok(false)` is a verdict (the block does not satisfy the rule);
/// `Err` means the check itself could not be carried out.
pub trait ProofAlgorithm: Send + Sync {
    /// Whether the block satisfies the proof requirements.
    fn is_valid_block(&self, block: &Block) -> Result<bool, ValidationError>;
}

/// Proof-of-Authority: one configured key certifies every block.
///
/// The proof data is built by signing
/// `SHA3-256(beneficiary || additional data || block hash)` with the
/// authority key and appending that key:
/// `signature(64) || public key(32)`.
pub struct ProofOfAuthority {
    /// Ed25519 public key of the block-producing authority.
    pub authority_public_key: [u8; PUBLIC_KEY_SIZE],
}

impl ProofAlgorithm for ProofOfAuthority {
    fn is_valid_block(&self, block: &Block) -> Result<bool, ValidationError> {
        if block.proof_data.len() != SIGNATURE_SIZE + PUBLIC_KEY_SIZE {
            return Ok(false);
        }

        let signature = &block.proof_data[..SIGNATURE_SIZE];
        let public_key = &block.proof_data[SIGNATURE_SIZE..];
        if public_key != self.authority_public_key.as_slice() {
            return Ok(false);
        }
        if block.beneficiary != derive_address(public_key) {
            return Ok(false);
        }

        let digest = sha3_256_many(&[
            block.beneficiary.as_slice(),
            block.additional_data.as_slice(),
            block.hash().as_slice(),
        ]);
        Ok(verify_raw(public_key, &digest, signature))
    }
}
