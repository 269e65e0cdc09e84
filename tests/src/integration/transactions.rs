//! # Transaction Application
//!
//! Transfers through the dispatcher: balance conservation, nonce replay,
//! underfunded senders and the all-or-nothing contract of `apply_block`.

#[cfg(test)]
mod tests {
    use bz_chain::ChainError;
    use bz_crypto::Ed25519KeyPair;
    use bz_protocol::Block;
    use bz_validation::{
        errors::TxError, gas::gas_amount, supply::block_reward, ValidationError,
    };

    use crate::support::*;

    /// Apply one block carrying `txs` on top of `prev`.
    fn apply_transfers(chain: &TestChain, prev: &Block, txs: &[bz_protocol::Tx]) -> Block {
        let block = make_block(prev, txs, &chain.authority);
        chain.dispatcher.apply_block(&block, txs).unwrap();
        block
    }

    #[test]
    fn test_transfer_conservation() {
        let chain = TestChain::bootstrap();
        let alice = Ed25519KeyPair::generate();
        let bob_address = [0xB0; 20];

        // Fund alice out of the authority's block reward.
        let funding = signed_transfer(&chain.authority, 1, &address_of(&alice), 1_000_000, 10);
        let block1 = apply_transfers(&chain, &chain.genesis, std::slice::from_ref(&funding));

        let beneficiary_before = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap()
            .balance;

        // Alice pays bob.
        let payment = signed_transfer(&alice, 1, &bob_address, 2_500, 40);
        let gas_paid = gas_amount(&payment) * payment.gas_price;
        apply_transfers(&chain, &block1, std::slice::from_ref(&payment));

        let alice_account = chain
            .dispatcher
            .get_account_state(&address_of(&alice))
            .unwrap();
        let bob_account = chain.dispatcher.get_account_state(&bob_address).unwrap();
        let beneficiary_after = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap()
            .balance;

        assert_eq!(alice_account.balance, 1_000_000 - 2_500 - 40 - gas_paid);
        assert_eq!(alice_account.out_tx_counter, 1);
        assert_eq!(bob_account.balance, 2_500);
        assert_eq!(
            beneficiary_after,
            beneficiary_before + block_reward(2) + 40 + gas_paid
        );
    }

    #[test]
    fn test_replayed_tx_is_rejected() {
        let chain = TestChain::bootstrap();
        let alice = Ed25519KeyPair::generate();

        let transfer = signed_transfer(&chain.authority, 1, &address_of(&alice), 1_000, 10);
        let block1 = apply_transfers(&chain, &chain.genesis, std::slice::from_ref(&transfer));

        // The same transaction again in the next block.
        let replay_block = make_block(&block1, std::slice::from_ref(&transfer), &chain.authority);
        let result = chain
            .dispatcher
            .apply_block(&replay_block, std::slice::from_ref(&transfer));

        assert!(matches!(
            result,
            Err(ChainError::MalformedBlock(ValidationError::Tx(
                TxError::Rejected
            )))
        ));
        assert_eq!(
            chain.dispatcher.get_tip().last_block_hash,
            block1.hash().to_vec()
        );
    }

    #[test]
    fn test_insufficient_funds_surfaces_as_malformed_block() {
        let chain = TestChain::bootstrap();
        let poor = Ed25519KeyPair::generate();

        // Give the account 100 Wei, then try to spend 90 + 20 in fees.
        let funding = signed_transfer(&chain.authority, 1, &address_of(&poor), 100, 10);
        let block1 = apply_transfers(&chain, &chain.genesis, std::slice::from_ref(&funding));

        let overdraft = signed_transfer(&poor, 1, &[0xB0; 20], 90, 20);
        let block2 = make_block(&block1, std::slice::from_ref(&overdraft), &chain.authority);
        let result = chain
            .dispatcher
            .apply_block(&block2, std::slice::from_ref(&overdraft));

        assert!(matches!(
            result,
            Err(ChainError::MalformedBlock(ValidationError::Tx(
                TxError::InsufficientFunds
            )))
        ));

        // No state change leaked out of the failed apply.
        let account = chain
            .dispatcher
            .get_account_state(&address_of(&poor))
            .unwrap();
        assert_eq!(account.balance, 100);
        assert_eq!(account.out_tx_counter, 0);
        assert_eq!(
            chain.dispatcher.get_tip().last_block_hash,
            block1.hash().to_vec()
        );
    }

    #[test]
    fn test_rejected_block_rolls_back_entirely() {
        let chain = TestChain::bootstrap();
        let alice = Ed25519KeyPair::generate();
        let authority_before = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap();

        // First transfer is valid on its own; the second breaks on a
        // replayed nonce. Nothing of the block may stick.
        let good = signed_transfer(&chain.authority, 1, &address_of(&alice), 5_000, 10);
        let bad = signed_transfer(&chain.authority, 1, &address_of(&alice), 7_000, 10);
        let txs = vec![good, bad];
        let block = make_block(&chain.genesis, &txs, &chain.authority);
        let result = chain.dispatcher.apply_block(&block, &txs);

        assert!(matches!(
            result,
            Err(ChainError::MalformedBlock(ValidationError::Tx(
                TxError::Rejected
            )))
        ));

        let authority_after = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap();
        assert_eq!(authority_after, authority_before);
        assert_eq!(
            chain
                .dispatcher
                .get_account_state(&address_of(&alice))
                .unwrap()
                .balance,
            0
        );
        assert_eq!(
            chain.dispatcher.get_tip().last_block_hash,
            chain.genesis.hash().to_vec()
        );
        assert_eq!(chain.store.get_block(&block.hash()).unwrap(), None);
    }

    #[test]
    fn test_sequential_nonces_apply_in_one_block() {
        let chain = TestChain::bootstrap();
        let alice = Ed25519KeyPair::generate();
        let bob = [0xB0; 20];

        let txs = vec![
            signed_transfer(&chain.authority, 1, &address_of(&alice), 1_000, 10),
            signed_transfer(&chain.authority, 2, &bob, 2_000, 10),
        ];
        apply_transfers(&chain, &chain.genesis, &txs);

        let authority_account = chain
            .dispatcher
            .get_account_state(&chain.beneficiary())
            .unwrap();
        assert_eq!(authority_account.out_tx_counter, 2);
        assert_eq!(
            chain
                .dispatcher
                .get_account_state(&address_of(&alice))
                .unwrap()
                .balance,
            1_000
        );
        assert_eq!(
            chain.dispatcher.get_account_state(&bob).unwrap().balance,
            2_000
        );
    }
}
