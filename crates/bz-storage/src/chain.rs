//! # Chain Record Accessors
//!
//! Blocks and transactions by hash, and the chain tip under its fixed
//! key in the blockchain table.

use prost::Message;

use bz_protocol::{Block, ChainTip, Tx};

use crate::errors::StoreError;
use crate::store::{LocalStore, Table};

/// Fixed key of the chain tip record in the blockchain table.
pub const CHAIN_STATE_KEY: &[u8] = b"chainState";

impl LocalStore {
    /// Save a block under its hash.
    pub fn save_block(&self, block: &Block) -> Result<(), StoreError> {
        let block_hash = block.hash();
        let block_data = block.encode_to_vec();
        self.update(|txn| txn.put(Table::Blockchain, &block_hash, &block_data))
    }

    /// Retrieve a block by hash; `Ok(None)` when not found.
    pub fn get_block(&self, hash: &[u8]) -> Result<Option<Block>, StoreError> {
        let data = self.view(|txn| txn.get(Table::Blockchain, hash))?;
        match data {
            Some(data) => Ok(Some(Block::decode(data.as_slice())?)),
            None => Ok(None),
        }
    }

    /// Save a transaction under its hash.
    pub fn save_tx(&self, tx: &Tx) -> Result<(), StoreError> {
        let tx_hash = tx.calculate_hash();
        let tx_data = tx.encode_to_vec();
        self.update(|txn| txn.put(Table::Transactions, &tx_hash, &tx_data))
    }

    /// Retrieve a transaction by hash; `Ok(None)` when not found.
    pub fn get_tx(&self, hash: &[u8]) -> Result<Option<Tx>, StoreError> {
        let data = self.view(|txn| txn.get(Table::Transactions, hash))?;
        match data {
            Some(data) => Ok(Some(Tx::decode(data.as_slice())?)),
            None => Ok(None),
        }
    }

    /// Load the persisted chain tip; `Ok(None)` on a fresh store.
    pub fn load_chain_tip(&self) -> Result<Option<ChainTip>, StoreError> {
        let data = self.view(|txn| txn.get(Table::Blockchain, CHAIN_STATE_KEY))?;
        match data {
            Some(data) => Ok(Some(ChainTip::decode(data.as_slice())?)),
            None => Ok(None),
        }
    }
}
