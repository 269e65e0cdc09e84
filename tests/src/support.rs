//! # Chain Fixtures
//!
//! Builders for the material every integration scenario needs: an
//! authority key, a signed genesis block, authority-certified successor
//! blocks and signed transfer transactions, plus a bootstrapped
//! dispatcher over a throwaway store.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

use bz_chain::Dispatcher;
use bz_crypto::{derive_address, sha3_256_many, Address, Ed25519KeyPair};
use bz_protocol::{calculate_merkle_root, Block, Tx};
use bz_storage::LocalStore;
use bz_validation::{gas::MINIMAL_GAS_FEE, ProofOfAuthority};

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Address of a keypair.
pub fn address_of(keypair: &Ed25519KeyPair) -> Address {
    derive_address(keypair.public_key().as_bytes())
}

/// Sign `block` with `keypair` (signature || public key).
pub fn sign_block(block: &mut Block, keypair: &Ed25519KeyPair) {
    let signature = keypair.sign(&block.hash());
    block.signature = [
        signature.as_bytes().as_slice(),
        keypair.public_key().as_bytes().as_slice(),
    ]
    .concat();
}

/// Attach proof-of-authority data certifying `block` with `authority`.
pub fn attach_proof(block: &mut Block, authority: &Ed25519KeyPair) {
    let digest = sha3_256_many(&[
        block.beneficiary.as_slice(),
        block.additional_data.as_slice(),
        block.hash().as_slice(),
    ]);
    let signature = authority.sign(&digest);
    block.proof_data = [
        signature.as_bytes().as_slice(),
        authority.public_key().as_bytes().as_slice(),
    ]
    .concat();
}

/// A well-formed, authority-signed genesis block.
pub fn make_genesis(authority: &Ed25519KeyPair) -> Block {
    let mut block = Block {
        version: 1,
        index: 0,
        timestamp: unix_now(),
        prev_block_hash: vec![0u8; 32],
        tx_merkle_root: calculate_merkle_root::<Vec<u8>>(&[]).to_vec(),
        state_merkle_root: vec![0u8; 32],
        beneficiary: address_of(authority).to_vec(),
        additional_data: Vec::new(),
        proof_data: Vec::new(),
        signature: Vec::new(),
        tx_hashes: Vec::new(),
    };
    sign_block(&mut block, authority);
    attach_proof(&mut block, authority);
    block
}

/// A successor of `prev` carrying `transactions`, certified by the
/// authority.
pub fn make_block(prev: &Block, transactions: &[Tx], authority: &Ed25519KeyPair) -> Block {
    let tx_hashes: Vec<Vec<u8>> = transactions.iter().map(|tx| tx.hash.clone()).collect();
    let mut block = Block {
        version: 1,
        index: prev.index + 1,
        timestamp: unix_now().max(prev.timestamp),
        prev_block_hash: prev.hash().to_vec(),
        tx_merkle_root: calculate_merkle_root(&tx_hashes).to_vec(),
        state_merkle_root: vec![0u8; 32],
        beneficiary: address_of(authority).to_vec(),
        additional_data: Vec::new(),
        proof_data: Vec::new(),
        signature: Vec::new(),
        tx_hashes,
    };
    sign_block(&mut block, authority);
    attach_proof(&mut block, authority);
    block
}

/// A signed transfer from `sender`'s account.
pub fn signed_transfer(
    sender: &Ed25519KeyPair,
    nonce: u64,
    to: &[u8],
    amount: u64,
    fee: u64,
) -> Tx {
    signed_transfer_priced(sender, nonce, to, amount, fee, MINIMAL_GAS_FEE)
}

/// A signed transfer with an explicit gas price.
pub fn signed_transfer_priced(
    sender: &Ed25519KeyPair,
    nonce: u64,
    to: &[u8],
    amount: u64,
    fee: u64,
    gas_price: u64,
) -> Tx {
    let mut tx = Tx {
        version: 1,
        from: address_of(sender).to_vec(),
        nonce,
        to: to.to_vec(),
        amount,
        fee,
        optional_data: Vec::new(),
        gas_limit: 1_000_000,
        gas_price,
        hash: Vec::new(),
        signature: Vec::new(),
    };
    tx.hash = tx.calculate_hash().to_vec();
    let signature = sender.sign(&tx.hash);
    tx.signature = [
        signature.as_bytes().as_slice(),
        sender.public_key().as_bytes().as_slice(),
    ]
    .concat();
    tx
}

/// A dispatcher bootstrapped from a fresh store and genesis block.
pub struct TestChain {
    /// Keeps the store directory alive for the test's duration.
    pub dir: TempDir,
    /// The block-producing authority (also the genesis beneficiary).
    pub authority: Ed25519KeyPair,
    /// The genesis block the chain was seeded from.
    pub genesis: Block,
    /// Direct handle on the store shared with the dispatcher.
    pub store: Arc<LocalStore>,
    /// The dispatcher under test.
    pub dispatcher: Dispatcher,
}

impl TestChain {
    /// Bootstrap a chain in a temporary directory.
    pub fn bootstrap() -> Self {
        let dir = TempDir::new().expect("temp store dir");
        let authority = Ed25519KeyPair::generate();
        let genesis = make_genesis(&authority);

        let store = Arc::new(LocalStore::open(dir.path()).expect("open store"));
        let dispatcher = Dispatcher::init(
            Arc::clone(&store),
            genesis.clone(),
            Box::new(ProofOfAuthority {
                authority_public_key: *authority.public_key().as_bytes(),
            }),
        )
        .expect("bootstrap dispatcher");

        TestChain {
            dir,
            authority,
            genesis,
            store,
            dispatcher,
        }
    }

    /// The authority's own account address.
    pub fn beneficiary(&self) -> Address {
        address_of(&self.authority)
    }
}
