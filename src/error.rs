use crate::types::{AssetId, MintRecord};
use thiserror::Error;

/// Failures reported by a [`LedgerClient`](crate::ledger::LedgerClient)
/// implementation.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON-RPC error: {code}: {message}")]
    JsonRpc { code: i32, message: String },

    #[error("Ledger rejected operation: {status}")]
    Rejected {
        status: String,
        message: Option<String>,
    },

    #[error("Timeout error: confirmation not received after {0} seconds")]
    Timeout(u64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

/// Failures of the mint workflow, tagged with the step that failed.
///
/// Only the fatal steps (asset creation, holder account, supply mint)
/// appear here. Failures of the optional revocation and metadata steps are
/// carried inside a successful [`MintOutcome`](crate::workflow::MintOutcome)
/// instead, because the asset exists and is minted by the time they run.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The ledger rejected asset creation. Nothing was created.
    #[error("asset creation failed")]
    AssetCreation(#[source] LedgerError),

    /// Holder-account creation failed after the asset was created.
    /// The asset id is retained so the caller can resume from this step.
    #[error("holder account creation failed for asset {asset_id}")]
    HolderAccount {
        asset_id: AssetId,
        #[source]
        source: LedgerError,
    },

    /// Minting the initial supply failed. The asset and holder account
    /// exist but hold no supply; the partial record is retained.
    #[error("minting failed for asset {}", .record.asset_id)]
    Mint {
        record: MintRecord,
        #[source]
        source: LedgerError,
    },
}

impl WorkflowError {
    /// The underlying ledger failure.
    pub fn ledger_error(&self) -> &LedgerError {
        match self {
            WorkflowError::AssetCreation(e) => e,
            WorkflowError::HolderAccount { source, .. } => source,
            WorkflowError::Mint { source, .. } => source,
        }
    }

    /// The asset id created before the failure, if any.
    pub fn asset_id(&self) -> Option<&AssetId> {
        match self {
            WorkflowError::AssetCreation(_) => None,
            WorkflowError::HolderAccount { asset_id, .. } => Some(asset_id),
            WorkflowError::Mint { record, .. } => Some(&record.asset_id),
        }
    }
}
