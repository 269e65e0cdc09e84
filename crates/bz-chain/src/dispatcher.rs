//! # Blockchain Dispatcher
//!
//! The single writer over the local chain state. `apply_block` holds the
//! exclusive lock for the entire store write transaction, so the
//! persisted tip, the state trie and the in-memory copies can never
//! diverge: the block either fully commits (state nodes, tip record,
//! block body) or leaves everything untouched.

use std::sync::Arc;

use parking_lot::RwLock;
use prost::Message;

use bz_merkle_trie::{MerkleTrie, TrieNode};
use bz_protocol::{AccountState, Block, ChainTip, Tx};
use bz_storage::{save_trie, LocalStore, Table, CHAIN_STATE_KEY};
use bz_validation::{
    apply_block_in_memory, check_block, check_genesis_block, BlockError, BlockVerdict,
    ProofAlgorithm, ValidationError,
};

use crate::errors::ChainError;

struct DispatcherState {
    current_tip: ChainTip,
    state_root: TrieNode,
}

/// The owner of the local chain state.
///
/// Constructed once at startup and shared (behind an `Arc`) with every
/// caller that needs to read or extend the chain.
pub struct Dispatcher {
    store: Arc<LocalStore>,
    proof_algo: Box<dyn ProofAlgorithm>,
    genesis_block: Block,
    state: RwLock<DispatcherState>,
}

impl Dispatcher {
    /// Load the current blockchain state from the local store.
    ///
    /// On a fresh store the supplied genesis block is applied with an
    /// empty transaction list, seeding both the state trie and the tip.
    pub fn init(
        store: Arc<LocalStore>,
        genesis_block: Block,
        proof_algo: Box<dyn ProofAlgorithm>,
    ) -> Result<Self, ChainError> {
        check_genesis_block(&genesis_block).map_err(ChainError::InvalidGenesis)?;
        if !proof_algo.is_valid_block(&genesis_block)? {
            return Err(ChainError::InvalidGenesis(ValidationError::Block(
                BlockError::Malformed,
            )));
        }

        store.init_null_state()?;

        let null_root = TrieNode::null();
        let dispatcher = Dispatcher {
            store,
            proof_algo,
            genesis_block,
            state: RwLock::new(DispatcherState {
                current_tip: ChainTip {
                    last_block_hash: vec![0u8; 32],
                    state_merkle_root: null_root.hash().to_vec(),
                    last_block_index: 0,
                },
                state_root: null_root,
            }),
        };

        match dispatcher.store.load_chain_tip()? {
            Some(tip) => dispatcher.load_state_trie(tip)?,
            None => {
                let genesis = dispatcher.genesis_block.clone();
                dispatcher.apply_block(&genesis, &[])?;
                tracing::info!("initialized chain state from genesis block");
            }
        }

        Ok(dispatcher)
    }

    fn load_state_trie(&self, tip: ChainTip) -> Result<(), ChainError> {
        let root_data = self
            .store
            .view(|txn| txn.get(Table::State, &tip.state_merkle_root))?
            .ok_or(ChainError::CorruptDatabase)?;
        let state_root =
            TrieNode::from_bytes(&root_data).map_err(|_| ChainError::CorruptDatabase)?;

        tracing::info!(
            "loaded blockchain, last block is {}",
            hex::encode(&tip.last_block_hash)
        );

        let mut state = self.state.write();
        state.current_tip = tip;
        state.state_root = state_root;
        Ok(())
    }

    /// Current chain tip.
    pub fn get_tip(&self) -> ChainTip {
        self.state.read().current_tip.clone()
    }

    /// The genesis block this chain was initialized from.
    pub fn get_genesis_block(&self) -> Block {
        self.genesis_block.clone()
    }

    /// Account state at the current tip.
    ///
    /// Trie nodes hydrated while descending stay local to this call.
    pub fn get_account_state(&self, address: &[u8]) -> Result<AccountState, ChainError> {
        let state = self.state.read();
        let root = state.state_root.clone();

        self.store.view(|txn| {
            let lookup = txn.state_lookup();
            let mut trie = MerkleTrie::new(root);
            AccountState::fetch(address, &mut trie, &lookup)
                .map_err(|err| ChainError::from(ValidationError::from(err)))
        })
    }

    /// Apply a block's transactions to the state trie and extend the
    /// chain by one block.
    ///
    /// Either everything is committed - updated trie nodes, the new tip
    /// record, the block body - or the store and the in-memory state are
    /// left untouched.
    pub fn apply_block(&self, block: &Block, transactions: &[Tx]) -> Result<(), ChainError> {
        let mut state = self.state.write();

        if block.prev_block_hash != state.current_tip.last_block_hash {
            return Err(ChainError::DifferentRoots);
        }

        if block.index == 0 {
            check_genesis_block(block).map_err(ChainError::MalformedBlock)?;
        } else {
            let prev_block = self
                .store
                .get_block(&state.current_tip.last_block_hash)?
                .ok_or(ChainError::CorruptDatabase)?;
            check_block(block, &prev_block).map_err(ChainError::MalformedBlock)?;
        }
        if !self.proof_algo.is_valid_block(block)? {
            return Err(ChainError::MalformedBlock(ValidationError::Block(
                BlockError::Malformed,
            )));
        }

        let prev_state_root = state.current_tip.state_merkle_root.clone();
        let (extended_tip, new_state_root) = self.store.update(|txn| {
            let lookup = txn.state_lookup();
            let verdict = apply_block_in_memory(&prev_state_root, block, transactions, &lookup)?;
            let mut applied = match verdict {
                BlockVerdict::Applied(applied) => applied,
                BlockVerdict::Rejected(violation) => {
                    return Err(ChainError::MalformedBlock(violation.into()))
                }
            };

            // Save the updated trie up to the root node. Split survivors
            // go first so the final flush of each path sees their hashes.
            let mut new_root_hash = applied.trie.root_hash();
            let mut tails = applied.trie.split_nodes().to_vec();
            tails.extend_from_slice(&applied.updated);
            for leaf in tails {
                new_root_hash = save_trie(&mut applied.trie, leaf, txn)?;
            }

            let extended_tip = ChainTip {
                last_block_hash: block.hash().to_vec(),
                state_merkle_root: new_root_hash.to_vec(),
                last_block_index: block.index,
            };
            txn.put(Table::Blockchain, CHAIN_STATE_KEY, &extended_tip.encode_to_vec())?;

            Ok((extended_tip, applied.trie.root().clone()))
        })?;

        // The transaction is committed; switch the in-memory view and
        // persist the block body while still holding the write lock.
        state.current_tip = extended_tip;
        state.state_root = new_state_root;

        self.store.save_block(block)?;
        tracing::info!("applied block {}", hex::encode(block.hash()));
        Ok(())
    }
}
