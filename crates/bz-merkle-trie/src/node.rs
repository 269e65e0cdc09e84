//! # Trie Node and its Canonical Codec
//!
//! Binary encoding (consensus-critical, any deviation is a fork):
//!
//! ```text
//! type               - 1 byte (flag set below)
//! ext key            - 1 byte length in nibbles + ceil(len/2) bytes,
//!                      low nibble of the last byte padded with 0xF when
//!                      the length is odd              (if hasExtKey)
//! children           - 2 byte big-endian bitmap (bit 15-i set iff a
//!                      child exists at nibble i) + 32 bytes per child
//!                      in ascending nibble order      (if hasChildren)
//! value              - 4 byte little-endian length + value bytes
//!                                                     (if hasValue)
//! ```
//!
//! A node's content hash is SHA3-256 of this encoding.

use std::collections::BTreeMap;

use bz_crypto::{sha3_256, Hash, HASH_SIZE};

use crate::errors::TrieError;
use crate::nibbles::nibble_value;

/// Node type flag set.
pub mod flags {
    /// Node references at least one child.
    pub const HAS_CHILDREN: u8 = 0b1;
    /// Node carries an extension key.
    pub const HAS_EXT_KEY: u8 = 0b10;
    /// Node carries a value.
    pub const HAS_VALUE: u8 = 0b100;
}

/// One Merkle trie node.
///
/// `children` maps a nibble (0..15) to the content hash of the child's
/// current encoding; hydrating a child means looking that hash up in the
/// store and decoding the bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieNode {
    /// Flag set describing which sections the node carries.
    pub kind: u8,
    /// Extension key as lowercase hex nibbles (empty unless `HAS_EXT_KEY`).
    pub ext_key: String,
    /// Opaque leaf payload (meaningful only with `HAS_VALUE`).
    pub value: Vec<u8>,
    /// Sparse children, nibble -> content hash of the child encoding.
    pub children: BTreeMap<u8, Hash>,
}

impl TrieNode {
    /// The null trie: no children, no extension key, no value.
    ///
    /// Every state trie starts from this node; its encoding is the single
    /// zero type byte.
    pub fn null() -> Self {
        TrieNode {
            kind: 0,
            ext_key: String::new(),
            value: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Whether the node references children.
    pub fn has_children(&self) -> bool {
        self.kind & flags::HAS_CHILDREN > 0
    }

    /// Whether the node carries an extension key.
    pub fn has_ext_key(&self) -> bool {
        self.kind & flags::HAS_EXT_KEY > 0
    }

    /// Whether the node carries a value.
    pub fn has_value(&self) -> bool {
        self.kind & flags::HAS_VALUE > 0
    }

    /// Encode the node in its canonical binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data_length = 1;
        if self.has_ext_key() {
            data_length += 1 + self.ext_key.len() / 2 + self.ext_key.len() % 2;
        }
        if self.has_children() {
            data_length += 2 + self.children.len() * HASH_SIZE;
        }
        if self.has_value() {
            data_length += 4 + self.value.len();
        }

        let mut data = Vec::with_capacity(data_length);
        data.push(self.kind);

        if self.has_ext_key() {
            data.push(self.ext_key.len() as u8);
            for pair in self.ext_key.as_bytes().chunks(2) {
                let hi = nibble_value(pair[0]);
                // Odd-length keys pad the missing low nibble with 0xF.
                let lo = if pair.len() == 2 {
                    nibble_value(pair[1])
                } else {
                    0xF
                };
                data.push((hi << 4) | lo);
            }
        }
        if self.has_children() {
            let mut bitmap: u16 = 0;
            for index in self.children.keys() {
                bitmap |= 1 << (15 - index);
            }
            data.extend_from_slice(&bitmap.to_be_bytes());
            for child_hash in self.children.values() {
                data.extend_from_slice(child_hash);
            }
        }
        if self.has_value() {
            data.extend_from_slice(&(self.value.len() as u32).to_le_bytes());
            data.extend_from_slice(&self.value);
        }

        data
    }

    /// Decode a node from its canonical binary format.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TrieError> {
        if data.is_empty() {
            return Err(TrieError::CorruptData);
        }

        let mut node = TrieNode::null();
        node.kind = data[0];
        let mut offset = 1;

        if node.has_ext_key() {
            node.parse_ext_key(data, &mut offset)?;
        }
        if node.has_children() {
            node.parse_children(data, &mut offset)?;
        }
        if node.has_value() {
            node.parse_value(data, &mut offset)?;
        }

        Ok(node)
    }

    /// Content hash of the node's current encoding.
    pub fn hash(&self) -> Hash {
        sha3_256(&self.to_bytes())
    }

    fn parse_ext_key(&mut self, data: &[u8], offset: &mut usize) -> Result<(), TrieError> {
        if data.len() <= *offset {
            return Err(TrieError::CorruptData);
        }

        let ext_key_len = data[*offset] as usize;
        *offset += 1;

        let ext_key_bytes = ext_key_len / 2 + ext_key_len % 2;
        if data.len() < *offset + ext_key_bytes {
            return Err(TrieError::CorruptData);
        }
        self.ext_key = hex::encode(&data[*offset..*offset + ext_key_bytes]);
        // Truncate by the nibble length, not the byte length: the padding
        // nibble of an odd-length key is not part of the key.
        self.ext_key.truncate(ext_key_len);
        *offset += ext_key_bytes;
        Ok(())
    }

    fn parse_children(&mut self, data: &[u8], offset: &mut usize) -> Result<(), TrieError> {
        if data.len() < *offset + 2 {
            return Err(TrieError::CorruptData);
        }

        let bitmap = u16::from_be_bytes([data[*offset], data[*offset + 1]]);
        *offset += 2;

        for i in 0u8..16 {
            if bitmap & (1 << (15 - i)) > 0 {
                if data.len() < *offset + HASH_SIZE {
                    return Err(TrieError::CorruptData);
                }
                let mut child_hash = [0u8; HASH_SIZE];
                child_hash.copy_from_slice(&data[*offset..*offset + HASH_SIZE]);
                self.children.insert(i, child_hash);
                *offset += HASH_SIZE;
            }
        }
        Ok(())
    }

    fn parse_value(&mut self, data: &[u8], offset: &mut usize) -> Result<(), TrieError> {
        if data.len() < *offset + 4 {
            return Err(TrieError::CorruptData);
        }

        let value_len = u32::from_le_bytes([
            data[*offset],
            data[*offset + 1],
            data[*offset + 2],
            data[*offset + 3],
        ]) as usize;
        *offset += 4;

        if data.len() < *offset + value_len {
            return Err(TrieError::CorruptData);
        }
        self.value = data[*offset..*offset + value_len].to_vec();
        *offset += value_len;
        Ok(())
    }
}
