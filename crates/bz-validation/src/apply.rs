//! # In-Memory Block Application
//!
//! Replays a block's transactions against a state trie hydrated from the
//! previous state root, without touching the store. The caller receives
//! the working trie plus the ordered list of updated leaves and decides
//! whether to persist them; a transaction-rule violation turns the whole
//! block into a rejection verdict instead.

use bz_merkle_trie::{Lookup, MerkleTrie, NodeId, TrieError};
use bz_protocol::{AccountState, Block, Tx};

use crate::errors::{TxError, ValidationError};
use crate::gas::gas_amount;
use crate::supply::block_reward;
use crate::tx::check_tx;

/// A block replayed successfully in memory.
pub struct AppliedBlock {
    /// The working trie holding the post-block state.
    pub trie: MerkleTrie,
    /// Updated trie leaves in application order; persisting each one
    /// root-ward commits the transition.
    pub updated: Vec<NodeId>,
}

/// Outcome of replaying a block in memory.
pub enum BlockVerdict {
    /// All transactions applied; the state transition is ready to commit.
    Applied(AppliedBlock),
    /// A transaction violated a rule; nothing may be committed.
    Rejected(TxError),
}

/// Evaluate one transaction against the evolving state.
///
/// Returns the updated trie leaves (sender, then recipient) and the
/// amount the block beneficiary earns from this transaction.
fn apply_tx_in_memory(
    tx: &Tx,
    state_root: &mut MerkleTrie,
    lookup: &Lookup<'_>,
) -> Result<(Vec<NodeId>, u64), ValidationError> {
    check_tx(tx, |address| {
        Ok(AccountState::fetch(address, state_root, lookup)?)
    })?;

    let recipient = AccountState::fetch(&tx.to, state_root, lookup)?;
    let benefactor = AccountState::fetch(&tx.from, state_root, lookup)?;

    let beneficiary_amount = tx.fee + gas_amount(tx) * tx.gas_price;
    let debit = tx.amount + beneficiary_amount;

    if benefactor.balance < debit {
        return Err(TxError::InsufficientFunds.into());
    }

    let benefactor = AccountState {
        balance: benefactor.balance - debit,
        out_tx_counter: benefactor.out_tx_counter + 1,
    };
    let recipient = AccountState {
        balance: recipient.balance.saturating_add(tx.amount),
        out_tx_counter: recipient.out_tx_counter,
    };

    let mut updated_children = Vec::with_capacity(2);
    updated_children.push(benefactor.save(&tx.from, state_root, lookup)?);
    updated_children.push(recipient.save(&tx.to, state_root, lookup)?);

    Ok((updated_children, beneficiary_amount))
}

/// Try to evaluate a block's transactions in memory.
///
/// Assumes the block itself was validated before. The state root is
/// hydrated from `lookup(prev_state_root)`; a missing root entry is a
/// corrupt store.
pub fn apply_block_in_memory(
    prev_state_root: &[u8],
    block: &Block,
    transactions: &[Tx],
    lookup: &Lookup<'_>,
) -> Result<BlockVerdict, ValidationError> {
    let mut beneficiary_amount = block_reward(block.index);
    let mut updated_children = Vec::with_capacity(transactions.len() * 2 + 1);

    let root_data = lookup(prev_state_root)?.ok_or(TrieError::CorruptSource)?;
    let mut state_root = MerkleTrie::from_root_bytes(&root_data)?;

    for tx in transactions {
        match apply_tx_in_memory(tx, &mut state_root, lookup) {
            Ok((mut tx_updated, tx_beneficiary_amount)) => {
                updated_children.append(&mut tx_updated);
                beneficiary_amount = beneficiary_amount.saturating_add(tx_beneficiary_amount);
            }
            Err(ValidationError::Tx(verdict)) => return Ok(BlockVerdict::Rejected(verdict)),
            Err(other) => return Err(other),
        }
    }

    let beneficiary = AccountState::fetch(&block.beneficiary, &mut state_root, lookup)?;
    let beneficiary = AccountState {
        balance: beneficiary.balance.saturating_add(beneficiary_amount),
        out_tx_counter: beneficiary.out_tx_counter,
    };
    let updated_child = beneficiary.save(&block.beneficiary, &mut state_root, lookup)?;
    updated_children.push(updated_child);

    Ok(BlockVerdict::Applied(AppliedBlock {
        trie: state_root,
        updated: updated_children,
    }))
}
