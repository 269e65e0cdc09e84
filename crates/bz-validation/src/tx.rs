//! # Transaction Rules
//!
//! A transaction is accepted only if its structure, gas budget, funding,
//! nonce and signature all check out against the sender's current
//! account state.

use bz_crypto::{derive_address, verify_raw, ADDRESS_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use bz_protocol::{AccountState, Tx};

use crate::errors::{TxError, ValidationError};
use crate::gas::{gas_amount, MINIMAL_GAS_FEE};

/// Current version of transaction supported by this implementation.
pub const CURRENT_TX_VERSION: u32 = 1;

/// Check whether the transaction data is valid.
///
/// `account_of` resolves the sender's account state; during block
/// application it descends the evolving in-memory trie, so a nonce or
/// balance consumed by an earlier transaction of the same block is
/// already visible here.
pub fn check_tx<F>(tx: &Tx, mut account_of: F) -> Result<(), ValidationError>
where
    F: FnMut(&[u8]) -> Result<AccountState, ValidationError>,
{
    if tx.version > CURRENT_TX_VERSION {
        return Err(TxError::Unsupported.into());
    }
    if tx.gas_price < MINIMAL_GAS_FEE {
        return Err(TxError::Malformed.into());
    }

    if tx.from.len() != ADDRESS_SIZE {
        return Err(TxError::Malformed.into());
    }
    if tx.to.len() != ADDRESS_SIZE {
        return Err(TxError::Malformed.into());
    }
    if tx.signature.len() != SIGNATURE_SIZE + PUBLIC_KEY_SIZE {
        return Err(TxError::Malformed.into());
    }

    let account = account_of(&tx.from)?;

    if tx.hash != tx.calculate_hash() {
        return Err(TxError::InvalidHash.into());
    }
    if tx.nonce <= account.out_tx_counter {
        return Err(TxError::Rejected.into());
    }

    let gas_cost = gas_amount(tx);
    if gas_cost > tx.gas_limit {
        return Err(TxError::InsufficientGas.into());
    }

    let tx_cost = tx.amount as u128 + tx.fee as u128 + gas_cost as u128 * tx.gas_price as u128;
    if (account.balance as u128) < tx_cost {
        return Err(TxError::InsufficientFunds.into());
    }

    let public_key = &tx.signature[SIGNATURE_SIZE..];
    if tx.from != derive_address(public_key) {
        return Err(TxError::Malformed.into());
    }
    if !verify_raw(public_key, &tx.hash, &tx.signature[..SIGNATURE_SIZE]) {
        return Err(TxError::Malformed.into());
    }

    Ok(())
}
