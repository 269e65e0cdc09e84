//! # State Trie Persistence
//!
//! Glue between the store's `state` table and the Merkle trie: lookup
//! closures for hydration and the root-ward persistence of updated
//! paths. The table is content-addressed - the key of every entry is the
//! SHA3-256 hash of its bytes - so persisting is write-if-absent and an
//! existing entry is never touched.

use bz_crypto::Hash;
use bz_merkle_trie::{MerkleTrie, NodeId, TrieError, TrieNode};

use crate::errors::StoreError;
use crate::store::{LocalStore, ReadTxn, Table, WriteTxn};

impl ReadTxn<'_> {
    /// Trie lookup closure over the `state` table of this snapshot.
    pub fn state_lookup(&self) -> impl Fn(&[u8]) -> Result<Option<Vec<u8>>, TrieError> + '_ {
        move |key: &[u8]| {
            self.get(Table::State, key)
                .map_err(|err| TrieError::Source(err.to_string()))
        }
    }
}

impl WriteTxn<'_> {
    /// Trie lookup closure over the `state` table of this transaction.
    pub fn state_lookup(&self) -> impl Fn(&[u8]) -> Result<Option<Vec<u8>>, TrieError> + '_ {
        move |key: &[u8]| {
            self.get(Table::State, key)
                .map_err(|err| TrieError::Source(err.to_string()))
        }
    }
}

/// Persist the trie path from `leaf` up to the root, writing each node's
/// bytes under its hash if absent. Returns the resulting root hash.
pub fn save_trie(trie: &mut MerkleTrie, leaf: NodeId, txn: &WriteTxn<'_>) -> Result<Hash, StoreError> {
    trie.flush_path::<StoreError>(leaf, &mut |hash, bytes| {
        if txn.get(Table::State, hash)?.is_none() {
            txn.put(Table::State, hash, bytes)?;
        }
        Ok(())
    })
}

impl LocalStore {
    /// Seed the `state` table with the null trie node.
    ///
    /// Every chain starts from the null trie; its bytes must be
    /// retrievable before the genesis block can be applied.
    pub fn init_null_state(&self) -> Result<(), StoreError> {
        let null_trie = TrieNode::null();
        self.update(|txn| txn.put(Table::State, &null_trie.hash(), &null_trie.to_bytes()))
    }
}
