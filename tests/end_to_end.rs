use mintflow::types::Creator;
use mintflow::{
    AssetDescriptor, AuthorityState, IdentityHandle, InMemoryLedger, MetadataRef, MintBuilder,
    MintOptions, MintWorkflow,
};
use std::sync::Arc;

fn setup() -> (Arc<InMemoryLedger>, MintWorkflow) {
    let ledger = Arc::new(InMemoryLedger::new());
    let workflow = MintWorkflow::new(ledger.clone());
    (ledger, workflow)
}

/// Non-fungible flow: precision 0, supply 1, no freeze authority, authority
/// revoked after the mint.
#[tokio::test]
async fn nft_mint_locks_supply_at_one() {
    let (ledger, workflow) = setup();
    let owner = IdentityHandle::random();
    let descriptor = AssetDescriptor::non_fungible(owner.clone());
    assert!(descriptor.freeze_authority.is_none());

    let outcome = workflow
        .mint_asset(
            &owner,
            &descriptor,
            MintOptions {
                revoke_authority: true,
                metadata: None,
            },
        )
        .await
        .unwrap();

    assert!(outcome.fully_applied());
    assert_eq!(outcome.authority, AuthorityState::Revoked);
    assert_eq!(ledger.balance_of(&outcome.record.holder_account_id), Some(1));
    assert_eq!(ledger.precision_of(&outcome.record.asset_id), Some(0));
    assert_eq!(ledger.mint_authority_of(&outcome.record.asset_id), Some(None));
}

/// Fungible flow: nine decimals, 1000 whole units, authority left active.
#[tokio::test]
async fn fungible_mint_with_nine_decimals() {
    let (ledger, workflow) = setup();
    let owner = IdentityHandle::random();
    let descriptor = AssetDescriptor::fungible(9, 1000, owner.clone()).unwrap();

    let outcome = workflow
        .mint_asset(&owner, &descriptor, MintOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.authority, AuthorityState::Active);
    assert_eq!(
        ledger.balance_of(&outcome.record.holder_account_id),
        Some(1000 * 10u64.pow(9))
    );
    assert!(ledger
        .mint_authority_of(&outcome.record.asset_id)
        .unwrap()
        .is_some());
}

/// NFT with off-chain metadata: royalties and a sole creator.
#[tokio::test]
async fn nft_mint_with_metadata() {
    let (ledger, workflow) = setup();
    let owner = IdentityHandle::random();

    let metadata = MetadataRef::new(
        "https://arweave.net/awesome.json",
        "My Awesome NFT",
        "AWESOME",
        500,
        vec![Creator::new(owner.clone(), 100)],
    )
    .unwrap();

    let outcome = MintBuilder::new(&workflow)
        .owner(owner.clone())
        .descriptor(AssetDescriptor::non_fungible(owner.clone()))
        .revoke_authority()
        .metadata(metadata.clone())
        .run()
        .await
        .unwrap();

    assert!(outcome.metadata_attached);
    assert_eq!(ledger.metadata_of(&outcome.record.asset_id), Some(metadata));
    assert_eq!(outcome.authority, AuthorityState::Revoked);
    assert_eq!(ledger.balance_of(&outcome.record.holder_account_id), Some(1));
}

/// A mint with a freeze authority set keeps it on the asset record.
#[tokio::test]
async fn freeze_authority_is_optional() {
    let (ledger, workflow) = setup();
    let owner = IdentityHandle::random();
    let freeze = IdentityHandle::random();
    let descriptor =
        AssetDescriptor::fungible(2, 50, owner.clone())
        .unwrap()
        .with_freeze_authority(freeze.clone());

    let outcome = workflow
        .mint_asset(&owner, &descriptor, MintOptions::default())
        .await
        .unwrap();

    assert!(outcome.fully_applied());
    assert_eq!(
        ledger.freeze_authority_of(&outcome.record.asset_id),
        Some(Some(freeze))
    );
}
