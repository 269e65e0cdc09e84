//! # Transaction Merkle Root
//!
//! Prefix-tagged Merkle tree over a sequence of leaf payloads. Every
//! item carries a one-byte domain prefix (`0x00` leaf, `0x01` internal)
//! so a leaf can never be reinterpreted as an internal node. An odd item
//! at the end of a level is promoted to the next level unchanged. The
//! final root strips the prefix byte.

use bz_crypto::{sha3_256, sha3_256_many, Hash};

const LEAF_NODE_PREFIX: u8 = 0x00;
const INTERNAL_NODE_PREFIX: u8 = 0x01;

/// Calculate the Merkle root over leaf payloads.
///
/// The root of an empty sequence is SHA3-256 of the empty input.
pub fn calculate_merkle_root<T: AsRef<[u8]>>(leaves: &[T]) -> Hash {
    if leaves.is_empty() {
        return sha3_256(&[]);
    }

    let mut tree: Vec<[u8; 33]> = leaves
        .iter()
        .map(|leaf| {
            let mut item = [0u8; 33];
            item[0] = LEAF_NODE_PREFIX;
            item[1..].copy_from_slice(&sha3_256(leaf.as_ref()));
            item
        })
        .collect();

    while tree.len() > 1 {
        let mut next = Vec::with_capacity(tree.len() / 2 + tree.len() % 2);
        for pair in tree.chunks(2) {
            if pair.len() == 1 {
                next.push(pair[0]);
                continue;
            }
            let mut item = [0u8; 33];
            item[0] = INTERNAL_NODE_PREFIX;
            item[1..].copy_from_slice(&sha3_256_many(&[&pair[0], &pair[1]]));
            next.push(item);
        }
        tree = next;
    }

    // Omit the prefix byte.
    let mut root = [0u8; 32];
    root.copy_from_slice(&tree[0][1..]);
    root
}
