//! # Node Configuration
//!
//! Paths and consensus material the chain core needs at startup. The
//! embedding binary may deserialize a [`NodeConfig`] from its config
//! file or start from [`NodeConfig::from_env`]; fields default to the
//! conventional layout under `./data`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use bz_validation::ProofOfAuthority;

use crate::errors::ChainError;

/// Startup configuration of the chain core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    /// Directory of the local store.
    pub db_path: PathBuf,

    /// File holding the serialized genesis block.
    pub genesis_block_file: PathBuf,

    /// Hex-encoded Ed25519 public key of the block-producing authority.
    pub authority_public_key: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/db"),
            genesis_block_file: PathBuf::from("./data/genesis.bin"),
            authority_public_key: String::new(),
        }
    }
}

impl NodeConfig {
    /// Build a configuration from the defaults, overridden by the
    /// `BZ_DB_PATH`, `BZ_GENESIS_FILE` and `BZ_AUTHORITY_KEY`
    /// environment variables where set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("BZ_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("BZ_GENESIS_FILE") {
            config.genesis_block_file = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("BZ_AUTHORITY_KEY") {
            config.authority_public_key = key;
        }
        config
    }

    /// Decode the configured authority public key.
    pub fn authority_key(&self) -> Result<[u8; 32], ChainError> {
        let bytes = hex::decode(&self.authority_public_key)
            .map_err(|_| ChainError::InvalidAuthorityKey)?;
        <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| ChainError::InvalidAuthorityKey)
    }

    /// Build the proof-of-authority algorithm from this configuration.
    pub fn proof_algorithm(&self) -> Result<ProofOfAuthority, ChainError> {
        Ok(ProofOfAuthority {
            authority_public_key: self.authority_key()?,
        })
    }
}
