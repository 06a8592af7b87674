use crate::error::LedgerError;
use crate::ledger::{Confirmation, LedgerClient};
use crate::types::{AccountId, AssetId, IdentityHandle, MetadataRef};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Ledger operations, used for the operation log and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    CreateAsset,
    EnsureAccount,
    Mint,
    RevokeAuthority,
    AttachMetadata,
}

#[derive(Debug, Clone)]
struct AssetEntry {
    precision: u8,
    /// None once the mint authority has been revoked.
    mint_authority: Option<IdentityHandle>,
    freeze_authority: Option<IdentityHandle>,
    supply: u64,
}

#[derive(Debug, Clone)]
struct AccountEntry {
    owner: IdentityHandle,
    asset_id: AssetId,
    balance: u64,
}

#[derive(Default)]
struct LedgerState {
    assets: HashMap<AssetId, AssetEntry>,
    accounts: HashMap<AccountId, AccountEntry>,
    metadata: HashMap<AssetId, MetadataRef>,
    operations: Vec<LedgerOp>,
    fail_next: Option<LedgerOp>,
    block_height: u64,
}

impl LedgerState {
    fn record(&mut self, op: LedgerOp) -> Result<(), LedgerError> {
        self.operations.push(op);
        if self.fail_next == Some(op) {
            self.fail_next = None;
            return Err(LedgerError::Rejected {
                status: "rejected".to_string(),
                message: Some(format!("injected failure for {:?}", op)),
            });
        }
        Ok(())
    }

    fn confirm(&mut self) -> Confirmation {
        self.block_height += 1;
        Confirmation {
            tx_hash: format!("{:064x}", self.block_height),
            block_height: self.block_height,
        }
    }
}

/// In-process [`LedgerClient`] for tests and local development.
///
/// Enforces the semantics the workflow relies on: idempotent account
/// creation, mint rejection for unknown assets or revoked/invalid
/// authority, attach-once metadata, and balance accounting. A single
/// scripted failure can be injected per operation kind to exercise the
/// workflow's partial-failure paths.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next occurrence of `op` fail with a rejection.
    pub fn fail_next(&self, op: LedgerOp) {
        self.state.lock().unwrap().fail_next = Some(op);
    }

    /// Balance of a holder account, if it exists.
    pub fn balance_of(&self, account_id: &AccountId) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(account_id)
            .map(|a| a.balance)
    }

    /// Current mint authority of an asset, if the asset exists.
    pub fn mint_authority_of(&self, asset_id: &AssetId) -> Option<Option<IdentityHandle>> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(asset_id)
            .map(|a| a.mint_authority.clone())
    }

    /// Total minted supply of an asset.
    pub fn supply_of(&self, asset_id: &AssetId) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(asset_id)
            .map(|a| a.supply)
    }

    /// Metadata bound to an asset, if any.
    pub fn metadata_of(&self, asset_id: &AssetId) -> Option<MetadataRef> {
        self.state.lock().unwrap().metadata.get(asset_id).cloned()
    }

    /// Every operation the ledger has seen, in order.
    pub fn operations(&self) -> Vec<LedgerOp> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Number of holder accounts in existence.
    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    /// Owner a holder account was created for.
    pub fn owner_of(&self, account_id: &AccountId) -> Option<IdentityHandle> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(account_id)
            .map(|a| a.owner.clone())
    }

    /// Precision the asset was created with.
    pub fn precision_of(&self, asset_id: &AssetId) -> Option<u8> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(asset_id)
            .map(|a| a.precision)
    }

    /// Freeze authority of an asset, if the asset exists.
    pub fn freeze_authority_of(&self, asset_id: &AssetId) -> Option<Option<IdentityHandle>> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(asset_id)
            .map(|a| a.freeze_authority.clone())
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn create_asset(
        &self,
        precision: u8,
        mint_authority: &IdentityHandle,
        freeze_authority: Option<&IdentityHandle>,
    ) -> Result<AssetId, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.record(LedgerOp::CreateAsset)?;

        let asset_id = AssetId::unique();
        state.assets.insert(
            asset_id.clone(),
            AssetEntry {
                precision,
                mint_authority: Some(mint_authority.clone()),
                freeze_authority: freeze_authority.cloned(),
                supply: 0,
            },
        );
        state.confirm();
        Ok(asset_id)
    }

    async fn ensure_account_exists(
        &self,
        account_id: &AccountId,
        owner: &IdentityHandle,
        asset_id: &AssetId,
    ) -> Result<bool, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.record(LedgerOp::EnsureAccount)?;

        if !state.assets.contains_key(asset_id) {
            return Err(LedgerError::Rejected {
                status: "rejected".to_string(),
                message: Some(format!("unknown asset {asset_id}")),
            });
        }

        if state.accounts.contains_key(account_id) {
            return Ok(false);
        }

        state.accounts.insert(
            account_id.clone(),
            AccountEntry {
                owner: owner.clone(),
                asset_id: asset_id.clone(),
                balance: 0,
            },
        );
        state.confirm();
        Ok(true)
    }

    async fn mint(
        &self,
        asset_id: &AssetId,
        destination: &AccountId,
        authority: &IdentityHandle,
        amount: u64,
    ) -> Result<Confirmation, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.record(LedgerOp::Mint)?;

        {
            let account = state
                .accounts
                .get(destination)
                .ok_or_else(|| LedgerError::Rejected {
                    status: "rejected".to_string(),
                    message: Some(format!("unknown account {destination}")),
                })?;
            if &account.asset_id != asset_id {
                return Err(LedgerError::Rejected {
                    status: "rejected".to_string(),
                    message: Some("account holds a different asset".to_string()),
                });
            }
        }

        {
            let asset = state.assets.get_mut(asset_id).ok_or_else(|| LedgerError::Rejected {
                status: "rejected".to_string(),
                message: Some(format!("unknown asset {asset_id}")),
            })?;

            match &asset.mint_authority {
                None => {
                    return Err(LedgerError::Rejected {
                        status: "rejected".to_string(),
                        message: Some("mint authority has been revoked".to_string()),
                    })
                }
                Some(current) if current != authority => {
                    return Err(LedgerError::Rejected {
                        status: "rejected".to_string(),
                        message: Some("invalid mint authority".to_string()),
                    })
                }
                Some(_) => {}
            }

            asset.supply = asset.supply.checked_add(amount).ok_or_else(|| {
                LedgerError::Rejected {
                    status: "rejected".to_string(),
                    message: Some("supply exceeds ledger cap".to_string()),
                }
            })?;
        }

        if let Some(account) = state.accounts.get_mut(destination) {
            account.balance += amount;
        }
        Ok(state.confirm())
    }

    async fn revoke_mint_authority(
        &self,
        asset_id: &AssetId,
        current_authority: &IdentityHandle,
    ) -> Result<Confirmation, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.record(LedgerOp::RevokeAuthority)?;

        let asset = state.assets.get_mut(asset_id).ok_or_else(|| LedgerError::Rejected {
            status: "rejected".to_string(),
            message: Some(format!("unknown asset {asset_id}")),
        })?;

        match &asset.mint_authority {
            None => {
                return Err(LedgerError::Rejected {
                    status: "rejected".to_string(),
                    message: Some("mint authority already revoked".to_string()),
                })
            }
            Some(current) if current != current_authority => {
                return Err(LedgerError::Rejected {
                    status: "rejected".to_string(),
                    message: Some("invalid mint authority".to_string()),
                })
            }
            Some(_) => {}
        }

        asset.mint_authority = None;
        Ok(state.confirm())
    }

    async fn attach_metadata(
        &self,
        asset_id: &AssetId,
        metadata: &MetadataRef,
    ) -> Result<Confirmation, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.record(LedgerOp::AttachMetadata)?;

        if !state.assets.contains_key(asset_id) {
            return Err(LedgerError::Rejected {
                status: "rejected".to_string(),
                message: Some(format!("unknown asset {asset_id}")),
            });
        }

        if state.metadata.contains_key(asset_id) {
            return Err(LedgerError::Rejected {
                status: "rejected".to_string(),
                message: Some("metadata already attached".to_string()),
            });
        }

        state.metadata.insert(asset_id.clone(), metadata.clone());
        Ok(state.confirm())
    }
}
