//! # Gas Schedule
//!
//! Every transaction consumes gas, paid to the block beneficiary at the
//! transaction's gas price.

use bz_protocol::Tx;

/// Gas cost for every byte of the encoded transaction.
pub const GAS_PER_TX_BYTE: u64 = 1;

/// Gas cost for every byte of the optional data payload.
pub const GAS_PER_TX_ADDITIONAL_DATA_BYTE: u64 = 5;

/// Gas cost for sending coins to a user account.
pub const GAS_PER_TX_TO_USER_ACCOUNT: u64 = 21_000;

/// Minimal price for one gas unit.
pub const MINIMAL_GAS_FEE: u64 = 2;

/// Amount of gas consumed by a transaction.
pub fn gas_amount(tx: &Tx) -> u64 {
    let mut gas_cost = 0u64;
    gas_cost += tx.optional_data.len() as u64 * GAS_PER_TX_ADDITIONAL_DATA_BYTE;
    gas_cost += tx.binary_data().len() as u64 * GAS_PER_TX_BYTE;
    gas_cost
}
