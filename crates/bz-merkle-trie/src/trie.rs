//! # Trie Operations
//!
//! [`MerkleTrie`] is the working form of one state trie: an arena of
//! hydrated nodes rooted at slot 0. Descent resolves children through
//! their content hash via a caller-supplied lookup into the store; a node
//! hydrated or created once stays live in the arena, so within one
//! application scope a later `find` observes an earlier `put` without the
//! store round trip.
//!
//! The arena never writes to the store itself. [`MerkleTrie::flush_path`]
//! re-encodes a touched path root-ward and hands `(hash, bytes)` pairs to
//! the caller, refreshing each parent's child-hash entry on the way up so
//! the returned root hash covers the whole mutation.

use std::collections::HashMap;

use bz_crypto::Hash;

use crate::errors::TrieError;
use crate::nibbles::{common_prefix_len, nibble_value};
use crate::node::{flags, TrieNode};

/// Handle of a node hydrated into a [`MerkleTrie`] arena.
pub type NodeId = usize;

/// Lookup closure resolving a content hash to stored node bytes.
///
/// `Ok(None)` means the key has no entry; the trie treats a missing
/// entry reached through a child reference as a corrupt store.
pub type Lookup<'a> = dyn Fn(&[u8]) -> Result<Option<Vec<u8>>, TrieError> + 'a;

const ROOT: NodeId = 0;

struct Slot {
    node: TrieNode,
    parent: Option<NodeId>,
    parent_key: u8,
    /// Children hydrated into (or created in) this arena, by nibble.
    live: HashMap<u8, NodeId>,
}

/// An arena-backed trie rooted at a single node.
pub struct MerkleTrie {
    slots: Vec<Slot>,
    split_nodes: Vec<NodeId>,
}

impl MerkleTrie {
    /// Build a trie rooted at `root`.
    pub fn new(root: TrieNode) -> Self {
        MerkleTrie {
            slots: vec![Slot {
                node: root,
                parent: None,
                parent_key: 0,
                live: HashMap::new(),
            }],
            split_nodes: Vec::new(),
        }
    }

    /// Build a trie rooted at the null node.
    pub fn null() -> Self {
        Self::new(TrieNode::null())
    }

    /// Build a trie by decoding the root node's stored bytes.
    pub fn from_root_bytes(data: &[u8]) -> Result<Self, TrieError> {
        Ok(Self::new(TrieNode::from_bytes(data)?))
    }

    /// The root node as currently materialized.
    pub fn root(&self) -> &TrieNode {
        &self.slots[ROOT].node
    }

    /// Hash of the root node as currently materialized.
    ///
    /// Fresh after a [`flush_path`](Self::flush_path) over every touched
    /// path; before that, inner child entries may still carry pre-write
    /// hashes.
    pub fn root_hash(&self) -> Hash {
        self.slots[ROOT].node.hash()
    }

    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.slots[id].node
    }

    /// Nodes created aside the returned `put` paths (split survivors).
    ///
    /// Their bytes must be persisted along with the path tails for every
    /// node reachable from the new root to exist in the store.
    pub fn split_nodes(&self) -> &[NodeId] {
        &self.split_nodes
    }

    /// Find the value stored under `key`, if any.
    pub fn find_value(
        &mut self,
        key: &str,
        lookup: &Lookup<'_>,
    ) -> Result<Option<Vec<u8>>, TrieError> {
        let (id, remaining) = self.find_closest(ROOT, key, lookup)?;
        let node = &self.slots[id].node;
        if remaining != node.ext_key || !node.has_value() {
            return Ok(None);
        }
        Ok(Some(node.value.clone()))
    }

    /// Insert or overwrite the value under `key`.
    ///
    /// Returns the deepest touched node; walking its parents covers the
    /// whole path that must be re-encoded and persisted.
    pub fn put(
        &mut self,
        key: &str,
        value: Vec<u8>,
        lookup: &Lookup<'_>,
    ) -> Result<NodeId, TrieError> {
        let (id, remaining) = self.find_closest(ROOT, key, lookup)?;

        if remaining == self.slots[id].node.ext_key {
            let node = &mut self.slots[id].node;
            node.value = value;
            node.kind |= flags::HAS_VALUE;
            return Ok(id);
        }

        self.slots[id].node.kind |= flags::HAS_CHILDREN;

        if self.slots[id].node.ext_key.is_empty() {
            return Ok(self.put_new_child(id, &remaining, value));
        }

        let ext_key = self.slots[id].node.ext_key.clone();
        let lcp = common_prefix_len(&remaining, &ext_key);
        if lcp == ext_key.len() {
            return Ok(self.put_new_child(id, &remaining[lcp..], value));
        }

        // Split: the node keeps the shared prefix, a new child at
        // ext_key[lcp] inherits its children, value and key remainder.
        self.split_below(id, &ext_key, lcp);

        if lcp == remaining.len() {
            let node = &mut self.slots[id].node;
            node.value = value;
            node.kind |= flags::HAS_VALUE;
            return Ok(id);
        }

        Ok(self.put_new_child(id, &remaining[lcp..], value))
    }

    /// Re-encode the path from `from` up to the root.
    ///
    /// Visits the path leaf-first; for every node it computes the current
    /// encoding, passes `(hash, bytes)` to `write`, then refreshes the
    /// parent's child-hash entry so the parent's own encoding covers the
    /// change. Returns the resulting root hash.
    pub fn flush_path<E>(
        &mut self,
        from: NodeId,
        write: &mut dyn FnMut(&Hash, &[u8]) -> Result<(), E>,
    ) -> Result<Hash, E> {
        let mut id = from;
        loop {
            let bytes = self.slots[id].node.to_bytes();
            let hash = bz_crypto::sha3_256(&bytes);
            write(&hash, &bytes)?;

            match self.slots[id].parent {
                Some(parent) => {
                    let parent_key = self.slots[id].parent_key;
                    self.slots[parent].node.children.insert(parent_key, hash);
                    id = parent;
                }
                None => return Ok(hash),
            }
        }
    }

    fn alloc(&mut self, node: TrieNode, parent: Option<NodeId>, parent_key: u8) -> NodeId {
        let id = self.slots.len();
        self.slots.push(Slot {
            node,
            parent,
            parent_key,
            live: HashMap::new(),
        });
        id
    }

    /// Resolve the child of `id` at `nib`: live if hydrated before,
    /// otherwise fetched through `lookup` and added to the arena.
    fn child(
        &mut self,
        id: NodeId,
        nib: u8,
        lookup: &Lookup<'_>,
    ) -> Result<Option<NodeId>, TrieError> {
        if let Some(&live) = self.slots[id].live.get(&nib) {
            return Ok(Some(live));
        }
        let Some(child_hash) = self.slots[id].node.children.get(&nib).copied() else {
            return Ok(None);
        };

        let data = lookup(&child_hash)?.ok_or(TrieError::CorruptSource)?;
        let node = TrieNode::from_bytes(&data).map_err(|_| TrieError::CorruptSource)?;
        let child_id = self.alloc(node, Some(id), nib);
        self.slots[id].live.insert(nib, child_id);
        Ok(Some(child_id))
    }

    /// Descend towards `key`, returning the deepest reachable node and
    /// the key suffix it could not consume.
    fn find_closest(
        &mut self,
        id: NodeId,
        key: &str,
        lookup: &Lookup<'_>,
    ) -> Result<(NodeId, String), TrieError> {
        if key.is_empty() {
            return Ok((id, String::new()));
        }

        // No extension key: one nibble per level.
        if self.slots[id].node.ext_key.is_empty() {
            let nib = nibble_value(key.as_bytes()[0]);
            return match self.child(id, nib, lookup)? {
                Some(child) => self.find_closest(child, &key[1..], lookup),
                None => Ok((id, key.to_string())),
            };
        }

        let lcp = common_prefix_len(key, &self.slots[id].node.ext_key);
        if lcp == 0 || lcp >= key.len() {
            return Ok((id, key.to_string()));
        }

        let nib = nibble_value(key.as_bytes()[lcp]);
        match self.child(id, nib, lookup)? {
            Some(child) => self.find_closest(child, &key[lcp + 1..], lookup),
            None => Ok((id, key.to_string())),
        }
    }

    /// Attach a fresh leaf below `parent` for the nonempty `subkey`.
    fn put_new_child(&mut self, parent: NodeId, subkey: &str, value: Vec<u8>) -> NodeId {
        let mut leaf = TrieNode::null();
        leaf.kind = flags::HAS_VALUE;
        leaf.value = value;
        if subkey.len() > 1 {
            leaf.kind |= flags::HAS_EXT_KEY;
            leaf.ext_key = subkey[1..].to_string();
        }

        let leaf_hash = leaf.hash();
        let nib = nibble_value(subkey.as_bytes()[0]);
        let leaf_id = self.alloc(leaf, Some(parent), nib);

        let slot = &mut self.slots[parent];
        slot.node.children.insert(nib, leaf_hash);
        slot.live.insert(nib, leaf_id);
        leaf_id
    }

    /// Split `id`'s extension key at `lcp`: a new child inherits the
    /// node's children, value and trailing key nibbles, and the node is
    /// left with the shared prefix and that single child.
    fn split_below(&mut self, id: NodeId, ext_key: &str, lcp: usize) -> NodeId {
        let split_nib = nibble_value(ext_key.as_bytes()[lcp]);

        let mut split = TrieNode::null();
        split.kind = flags::HAS_CHILDREN;
        {
            let node = &mut self.slots[id].node;
            split.children = std::mem::take(&mut node.children);
            if node.has_value() {
                split.value = std::mem::take(&mut node.value);
                split.kind |= flags::HAS_VALUE;
                node.kind ^= flags::HAS_VALUE;
            }
        }
        if ext_key.len() > lcp + 1 {
            split.kind |= flags::HAS_EXT_KEY;
            split.ext_key = ext_key[lcp + 1..].to_string();
        }
        let split_hash = split.hash();

        // The node's hydrated children move below the split node.
        let live = std::mem::take(&mut self.slots[id].live);
        let split_id = self.alloc(split, Some(id), split_nib);
        for &child_id in live.values() {
            self.slots[child_id].parent = Some(split_id);
        }
        self.slots[split_id].live = live;

        let slot = &mut self.slots[id];
        slot.node.ext_key = ext_key[..lcp].to_string();
        slot.node.children.insert(split_nib, split_hash);
        slot.live.insert(split_nib, split_id);

        self.split_nodes.push(split_id);
        split_id
    }
}
