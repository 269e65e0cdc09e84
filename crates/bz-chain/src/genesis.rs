//! # Genesis Block Loading
//!
//! The genesis block arrives as a file holding the serialized block
//! record. It must pass the genesis rules and the proof algorithm
//! before the node accepts it as the origin of its chain.

use std::fs;
use std::path::Path;

use prost::Message;

use bz_protocol::Block;
use bz_validation::{check_genesis_block, BlockError, ProofAlgorithm, ValidationError};

use crate::errors::ChainError;

/// Read and validate the genesis block from `path`.
pub fn load_genesis_block(
    path: impl AsRef<Path>,
    proof_algo: &dyn ProofAlgorithm,
) -> Result<Block, ChainError> {
    let block_data = fs::read(path)?;
    let block = Block::decode(block_data.as_slice())?;

    check_genesis_block(&block).map_err(ChainError::InvalidGenesis)?;
    if !proof_algo.is_valid_block(&block)? {
        return Err(ChainError::InvalidGenesis(ValidationError::Block(
            BlockError::Malformed,
        )));
    }

    tracing::info!("loaded genesis block {}", hex::encode(block.hash()));
    Ok(block)
}
