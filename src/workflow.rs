use crate::error::{LedgerError, WorkflowError};
use crate::ledger::LedgerClient;
use crate::types::{
    AssetDescriptor, AuthorityState, IdentityHandle, MetadataRef, MintRecord,
};
use std::sync::Arc;

/// Options recognized by [`MintWorkflow::mint_asset`].
#[derive(Debug, Clone, Default)]
pub struct MintOptions {
    /// Revoke the mint authority once the initial supply is minted,
    /// permanently fixing the supply.
    pub revoke_authority: bool,
    /// Metadata to bind to the asset after creation.
    pub metadata: Option<MetadataRef>,
}

/// Result of a mint invocation.
///
/// The mint itself succeeded; the optional revocation and metadata steps
/// may still have failed individually. Their errors are retained here
/// rather than failing the call, because the on-chain effects of the
/// earlier steps are not reversible.
#[derive(Debug)]
pub struct MintOutcome {
    pub record: MintRecord,
    pub authority: AuthorityState,
    pub metadata_attached: bool,
    /// Set when revocation was requested but the ledger rejected it; the
    /// asset retains a live mint authority.
    pub revocation_error: Option<LedgerError>,
    /// Set when metadata was supplied but could not be attached.
    pub metadata_error: Option<LedgerError>,
}

impl MintOutcome {
    /// True when every requested step, including the optional ones, took
    /// effect.
    pub fn fully_applied(&self) -> bool {
        self.revocation_error.is_none() && self.metadata_error.is_none()
    }
}

/// Orchestrates the ordered steps of minting an asset.
///
/// The collaborating [`LedgerClient`] is passed in explicitly; the workflow
/// holds no connection or payer state of its own, so independent
/// invocations are isolated and may run concurrently.
pub struct MintWorkflow {
    client: Arc<dyn LedgerClient>,
}

impl MintWorkflow {
    /// Create a workflow over the given ledger client.
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        Self { client }
    }

    /// Mint an asset for `owner` according to `descriptor`.
    ///
    /// Steps run strictly in order, each awaited to confirmation before the
    /// next: create the asset, establish the holder account, mint the
    /// initial supply, then optionally revoke the mint authority and attach
    /// metadata. No step is retried; a failure in the first three steps is
    /// returned as a [`WorkflowError`] tagged with the step and carrying
    /// whatever identities were already created, so the caller can decide
    /// whether to resume.
    pub async fn mint_asset(
        &self,
        owner: &IdentityHandle,
        descriptor: &AssetDescriptor,
        options: MintOptions,
    ) -> Result<MintOutcome, WorkflowError> {
        // Step 1: create the asset record
        let asset_id = self
            .client
            .create_asset(
                descriptor.precision,
                &descriptor.mint_authority,
                descriptor.freeze_authority.as_ref(),
            )
            .await
            .map_err(WorkflowError::AssetCreation)?;
        tracing::info!(asset = %asset_id, precision = descriptor.precision, "asset created");

        // Step 2: derive and establish the holder account. Re-running
        // against a partially completed prior attempt is tolerated: an
        // existing account is a no-op.
        let holder_account_id = self.client.derive_account(&asset_id, owner);
        let created = self
            .client
            .ensure_account_exists(&holder_account_id, owner, &asset_id)
            .await
            .map_err(|source| WorkflowError::HolderAccount {
                asset_id: asset_id.clone(),
                source,
            })?;
        tracing::debug!(account = %holder_account_id, created, "holder account ready");

        let record = MintRecord {
            asset_id,
            holder_account_id,
        };

        // Step 3: mint the initial supply
        self.client
            .mint(
                &record.asset_id,
                &record.holder_account_id,
                &descriptor.mint_authority,
                descriptor.initial_supply,
            )
            .await
            .map_err(|source| WorkflowError::Mint {
                record: record.clone(),
                source,
            })?;
        tracing::info!(
            asset = %record.asset_id,
            amount = descriptor.initial_supply,
            "initial supply minted"
        );

        // Step 4: revoke the mint authority. Only reached after minting
        // succeeded; a rejection leaves the asset minted but with a live
        // authority, which is reported rather than swallowed.
        let mut authority = AuthorityState::Active;
        let mut revocation_error = None;
        if options.revoke_authority {
            match self
                .client
                .revoke_mint_authority(&record.asset_id, &descriptor.mint_authority)
                .await
            {
                Ok(_) => {
                    authority = AuthorityState::Revoked;
                    tracing::info!(asset = %record.asset_id, "mint authority revoked");
                }
                Err(e) => {
                    tracing::warn!(asset = %record.asset_id, error = %e, "authority revocation failed");
                    revocation_error = Some(e);
                }
            }
        }

        // Step 5: attach metadata. Independent of revocation; a failure
        // does not roll back anything.
        let mut metadata_attached = false;
        let mut metadata_error = None;
        if let Some(metadata) = &options.metadata {
            match self.client.attach_metadata(&record.asset_id, metadata).await {
                Ok(_) => {
                    metadata_attached = true;
                    tracing::info!(asset = %record.asset_id, uri = %metadata.uri, "metadata attached");
                }
                Err(e) => {
                    tracing::warn!(asset = %record.asset_id, error = %e, "metadata attachment failed");
                    metadata_error = Some(e);
                }
            }
        }

        Ok(MintOutcome {
            record,
            authority,
            metadata_attached,
            revocation_error,
            metadata_error,
        })
    }
}

/// Fluent builder over [`MintWorkflow::mint_asset`].
pub struct MintBuilder<'a> {
    workflow: &'a MintWorkflow,
    owner: Option<IdentityHandle>,
    descriptor: Option<AssetDescriptor>,
    options: MintOptions,
}

impl<'a> MintBuilder<'a> {
    /// Create a new mint builder
    pub fn new(workflow: &'a MintWorkflow) -> Self {
        Self {
            workflow,
            owner: None,
            descriptor: None,
            options: MintOptions::default(),
        }
    }

    /// Set the owner receiving the initial supply
    pub fn owner(mut self, owner: IdentityHandle) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the asset descriptor
    pub fn descriptor(mut self, descriptor: AssetDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Revoke the mint authority after minting
    pub fn revoke_authority(mut self) -> Self {
        self.options.revoke_authority = true;
        self
    }

    /// Attach metadata after creation
    pub fn metadata(mut self, metadata: MetadataRef) -> Self {
        self.options.metadata = Some(metadata);
        self
    }

    /// Run the workflow
    pub async fn run(self) -> Result<MintOutcome, WorkflowError> {
        let owner = self.owner.ok_or_else(|| {
            WorkflowError::AssetCreation(LedgerError::InvalidParameter(
                "Missing owner".to_string(),
            ))
        })?;
        let descriptor = self.descriptor.ok_or_else(|| {
            WorkflowError::AssetCreation(LedgerError::InvalidParameter(
                "Missing descriptor".to_string(),
            ))
        })?;

        self.workflow
            .mint_asset(&owner, &descriptor, self.options)
            .await
    }
}
