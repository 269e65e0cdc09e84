//! # Buuzcoin Test Suite
//!
//! Unified test crate for cross-crate scenarios:
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Chain fixtures: keys, signed blocks, transfers
//! └── integration/      # End-to-end scenarios over a real store
//!     ├── chain_lifecycle.rs   # bootstrap, tip linkage, restart
//!     ├── transactions.rs      # transfers, replay, funding, rollback
//!     └── state_trie.rs        # path-copy safety across commits
//! ```
//!
//! Run with `cargo test -p bz-tests`.

#![allow(dead_code)]

pub mod integration;
pub mod support;
