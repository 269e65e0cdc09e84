//! # Block Rules
//!
//! Structural and linkage checks for genesis and ordinary blocks.
//! Neither check verifies the state merkle root: that is established by
//! actually applying the block.

use std::time::{SystemTime, UNIX_EPOCH};

use bz_crypto::{derive_address, verify_raw, ADDRESS_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use bz_protocol::{calculate_merkle_root, Block};

use crate::errors::{BlockError, ValidationError};

/// Current version of block supported by this implementation.
pub const CURRENT_BLOCK_VERSION: u32 = 1;

/// A block cannot be created more than 15 minutes in the future.
const MAX_FUTURE_DRIFT_SECS: i64 = 15 * 60;

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

fn check_signature(block: &Block) -> Result<(), ValidationError> {
    if block.signature.len() != SIGNATURE_SIZE + PUBLIC_KEY_SIZE {
        return Err(BlockError::Malformed.into());
    }

    let block_hash = block.hash();
    let public_key = &block.signature[SIGNATURE_SIZE..];
    if block.beneficiary != derive_address(public_key) {
        return Err(BlockError::Malformed.into());
    }
    if !verify_raw(public_key, &block_hash, &block.signature[..SIGNATURE_SIZE]) {
        return Err(BlockError::Malformed.into());
    }
    Ok(())
}

/// Check whether a genesis block satisfies the network requirements.
pub fn check_genesis_block(block: &Block) -> Result<(), ValidationError> {
    if block.version > CURRENT_BLOCK_VERSION {
        return Err(BlockError::VersionUnsupported.into());
    }
    if block.index != 0 {
        return Err(BlockError::InvalidIndex.into());
    }

    if block.beneficiary.len() != ADDRESS_SIZE {
        return Err(BlockError::Malformed.into());
    }
    if block.additional_data.len() > 32 {
        return Err(BlockError::Malformed.into());
    }
    if !block.tx_hashes.is_empty() {
        return Err(BlockError::Malformed.into());
    }

    if block.timestamp > unix_now() + MAX_FUTURE_DRIFT_SECS {
        return Err(BlockError::InvalidTimestamp.into());
    }

    if block.prev_block_hash != [0u8; 32] {
        return Err(BlockError::InvalidHash.into());
    }
    if block.tx_merkle_root != calculate_merkle_root(&block.tx_hashes) {
        return Err(BlockError::InvalidMerkleRoot.into());
    }

    check_signature(block)
}

/// Check whether a block satisfies the network requirements as the
/// successor of `prev_block`.
pub fn check_block(block: &Block, prev_block: &Block) -> Result<(), ValidationError> {
    if block.version > CURRENT_BLOCK_VERSION {
        return Err(BlockError::VersionUnsupported.into());
    }
    if block.index == 0 || block.index - 1 != prev_block.index {
        return Err(BlockError::InvalidIndex.into());
    }

    if block.beneficiary.len() != ADDRESS_SIZE {
        return Err(BlockError::Malformed.into());
    }
    if block.additional_data.len() > 32 {
        return Err(BlockError::Malformed.into());
    }
    if block.proof_data.is_empty() {
        return Err(BlockError::Malformed.into());
    }
    for tx_hash in &block.tx_hashes {
        if tx_hash.len() != 32 {
            return Err(BlockError::Malformed.into());
        }
    }

    if block.timestamp > unix_now() + MAX_FUTURE_DRIFT_SECS {
        return Err(BlockError::InvalidTimestamp.into());
    }
    if block.timestamp < prev_block.timestamp {
        return Err(BlockError::InvalidTimestamp.into());
    }

    if block.prev_block_hash != prev_block.hash() {
        return Err(BlockError::InvalidHash.into());
    }
    if block.tx_merkle_root != calculate_merkle_root(&block.tx_hashes) {
        return Err(BlockError::InvalidMerkleRoot.into());
    }

    check_signature(block)
}
