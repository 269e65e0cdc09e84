//! # Account State
//!
//! Account records live in the state trie: the leaf for an account is
//! keyed by the lowercase hex encoding of its 20-byte address (40
//! nibbles) and its value slot holds the protobuf-encoded record. An
//! absent leaf means the account never transacted and reads as the
//! default record.

use bz_merkle_trie::{Lookup, MerkleTrie, NodeId};
use prost::Message;

use crate::errors::ProtocolError;

/// Balance and out-transaction counter of one account.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountState {
    /// Spendable balance in Wei.
    #[prost(uint64, tag = "1")]
    pub balance: u64,
    /// Strictly increasing counter of accepted outgoing transactions.
    #[prost(uint64, tag = "2")]
    pub out_tx_counter: u64,
}

impl AccountState {
    /// Retrieve the account state from the state trie.
    ///
    /// Returns the initial state if no record is found.
    pub fn fetch(
        address: &[u8],
        state_root: &mut MerkleTrie,
        lookup: &Lookup<'_>,
    ) -> Result<AccountState, ProtocolError> {
        match state_root.find_value(&hex::encode(address), lookup)? {
            Some(data) => Ok(AccountState::decode(data.as_slice())?),
            None => Ok(AccountState::default()),
        }
    }

    /// Write the account state to the trie passed.
    ///
    /// Returns the updated trie leaf; persisting it root-ward commits the
    /// change.
    pub fn save(
        &self,
        address: &[u8],
        state_root: &mut MerkleTrie,
        lookup: &Lookup<'_>,
    ) -> Result<NodeId, ProtocolError> {
        let record = self.encode_to_vec();
        Ok(state_root.put(&hex::encode(address), record, lookup)?)
    }
}
