use crate::error::LedgerError;
use crate::types::IdentityHandle;
use serde::{Deserialize, Serialize};

/// Maximum royalty, in basis points (100%).
pub const MAX_ROYALTY_BASIS_POINTS: u16 = 10_000;

/// A creator entitled to a share of royalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub identity: IdentityHandle,
    pub share_percent: u8,
}

impl Creator {
    pub fn new(identity: IdentityHandle, share_percent: u8) -> Self {
        Self {
            identity,
            share_percent,
        }
    }
}

/// Reference to externally stored descriptive data for an asset.
///
/// The uri must already point at hosted metadata; uploading is the caller's
/// concern, not the workflow's. Attached at most once per asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRef {
    pub uri: String,
    pub name: String,
    pub symbol: String,
    pub royalty_basis_points: u16,
    pub creators: Vec<Creator>,
}

impl MetadataRef {
    /// Create a validated metadata reference.
    ///
    /// Rejects royalties above 100% and creator shares that do not sum to
    /// exactly 100.
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        royalty_basis_points: u16,
        creators: Vec<Creator>,
    ) -> Result<Self, LedgerError> {
        if royalty_basis_points > MAX_ROYALTY_BASIS_POINTS {
            return Err(LedgerError::InvalidParameter(format!(
                "royalty must be at most {} basis points, got {}",
                MAX_ROYALTY_BASIS_POINTS, royalty_basis_points
            )));
        }
        if !creators.is_empty() {
            let total: u32 = creators.iter().map(|c| c.share_percent as u32).sum();
            if total != 100 {
                return Err(LedgerError::InvalidParameter(format!(
                    "creator shares must sum to 100, got {}",
                    total
                )));
            }
        }
        Ok(Self {
            uri: uri.into(),
            name: name.into(),
            symbol: symbol.into(),
            royalty_basis_points,
            creators,
        })
    }
}
