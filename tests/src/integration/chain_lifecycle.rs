//! # Chain Lifecycle
//!
//! Bootstrap from genesis, tip linkage, proof gating and restart from a
//! persisted tip.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bz_chain::{ChainError, Dispatcher};
    use bz_crypto::Ed25519KeyPair;
    use bz_storage::LocalStore;
    use bz_validation::{supply::block_reward, ProofOfAuthority};

    use crate::support::*;

    #[test]
    fn test_bootstrap_from_genesis() {
        let chain = TestChain::bootstrap();

        let tip = chain.dispatcher.get_tip();
        assert_eq!(tip.last_block_hash, chain.genesis.hash().to_vec());
        assert_eq!(tip.last_block_index, 0);

        let beneficiary = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap();
        assert_eq!(beneficiary.balance, block_reward(0));
        assert_eq!(beneficiary.balance, 5_000_000_000);
    }

    #[test]
    fn test_genesis_block_is_persisted() {
        let chain = TestChain::bootstrap();

        let stored = chain.store.get_block(&chain.genesis.hash()).unwrap();
        assert_eq!(stored, Some(chain.genesis.clone()));
    }

    #[test]
    fn test_tip_mismatch_is_rejected() {
        let chain = TestChain::bootstrap();
        let before = chain.dispatcher.get_tip();

        let mut unlinked = make_block(&chain.genesis, &[], &chain.authority);
        unlinked.prev_block_hash = vec![0x01; 32];
        sign_block(&mut unlinked, &chain.authority);
        attach_proof(&mut unlinked, &chain.authority);

        let result = chain.dispatcher.apply_block(&unlinked, &[]);
        assert!(matches!(result, Err(ChainError::DifferentRoots)));
        assert_eq!(chain.dispatcher.get_tip(), before);
    }

    #[test]
    fn test_empty_successor_accrues_reward() {
        let chain = TestChain::bootstrap();

        let block = make_block(&chain.genesis, &[], &chain.authority);
        chain.dispatcher.apply_block(&block, &[]).unwrap();

        let tip = chain.dispatcher.get_tip();
        assert_eq!(tip.last_block_hash, block.hash().to_vec());
        assert_eq!(tip.last_block_index, 1);

        let beneficiary = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap();
        assert_eq!(beneficiary.balance, block_reward(0) + block_reward(1));
    }

    #[test]
    fn test_non_authority_proof_is_rejected() {
        let chain = TestChain::bootstrap();
        let impostor = Ed25519KeyPair::generate();

        // Well-formed and self-consistently signed, but certified by a
        // key the network does not recognize.
        let rogue = make_block(&chain.genesis, &[], &impostor);

        let result = chain.dispatcher.apply_block(&rogue, &[]);
        assert!(matches!(result, Err(ChainError::MalformedBlock(_))));
        assert_eq!(
            chain.dispatcher.get_tip().last_block_hash,
            chain.genesis.hash().to_vec()
        );
    }

    #[test]
    fn test_restart_resumes_from_persisted_tip() {
        let chain = TestChain::bootstrap();

        let block = make_block(&chain.genesis, &[], &chain.authority);
        chain.dispatcher.apply_block(&block, &[]).unwrap();
        let tip = chain.dispatcher.get_tip();
        let beneficiary = chain.beneficiary();
        let balance = chain
            .dispatcher
            .get_account_state(&beneficiary)
            .unwrap()
            .balance;

        let TestChain {
            dir,
            authority,
            genesis,
            store,
            dispatcher,
        } = chain;
        drop(dispatcher);
        drop(store);

        let store = Arc::new(LocalStore::open(dir.path()).unwrap());
        let reopened = Dispatcher::init(
            store,
            genesis,
            Box::new(ProofOfAuthority {
                authority_public_key: *authority.public_key().as_bytes(),
            }),
        )
        .unwrap();

        assert_eq!(reopened.get_tip(), tip);
        assert_eq!(
            reopened.get_account_state(&beneficiary).unwrap().balance,
            balance
        );
    }
}
