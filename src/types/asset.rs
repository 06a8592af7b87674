use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity handle - 32 bytes
///
/// Identifies an owner or an authority. The SDK never interprets the bytes;
/// key derivation and signing belong to the ledger client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityHandle([u8; 32]);

// Hex string format on the wire
impl Serialize for IdentityHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for IdentityHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        let bytes = hex::decode(&hex_string).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "IdentityHandle must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(IdentityHandle(array))
    }
}

impl IdentityHandle {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, LedgerError> {
        if slice.len() != 32 {
            return Err(LedgerError::InvalidParameter(
                "IdentityHandle must be 32 bytes".to_string(),
            ));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, LedgerError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_slice(&bytes)
    }

    /// Generate a random identity, for tests and local development.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        use rand::RngCore;
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for IdentityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Asset identifier - 32 bytes, generated once at creation time and never
/// reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId([u8; 32]);

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        let bytes = hex::decode(&hex_string).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "AssetId must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(AssetId(array))
    }
}

impl AssetId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, LedgerError> {
        if slice.len() != 32 {
            return Err(LedgerError::InvalidParameter(
                "AssetId must be 32 bytes".to_string(),
            ));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Generate a fresh asset identity using timestamp and random bytes.
    /// This ensures uniqueness across runs against the same ledger.
    pub fn unique() -> Self {
        let mut bytes = [0u8; 32];
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        bytes[0..16].copy_from_slice(&timestamp.to_be_bytes());
        use rand::RngCore;
        rand::thread_rng().fill_bytes(&mut bytes[16..]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Holder-account identifier - 32 bytes, derived deterministically from
/// (asset, owner). Never chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId([u8; 32]);

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        let bytes = hex::decode(&hex_string).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "AccountId must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Ok(AccountId(array))
    }
}

impl AccountId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Description of the asset to create. Immutable once passed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Number of fractional digits. 0 for a non-fungible unit.
    pub precision: u8,
    /// Initial supply in raw (smallest) units.
    pub initial_supply: u64,
    /// Identity permitted to create new units of the asset.
    pub mint_authority: IdentityHandle,
    /// Identity permitted to freeze holder accounts, if any.
    pub freeze_authority: Option<IdentityHandle>,
}

impl AssetDescriptor {
    /// Descriptor for a non-fungible unit: precision 0, supply 1.
    pub fn non_fungible(mint_authority: IdentityHandle) -> Self {
        Self {
            precision: 0,
            initial_supply: 1,
            mint_authority,
            freeze_authority: None,
        }
    }

    /// Descriptor for a fungible asset, converting whole units to raw
    /// units at the given precision.
    ///
    /// Rejects combinations whose raw supply does not fit in 64 bits.
    pub fn fungible(
        precision: u8,
        whole_units: u64,
        mint_authority: IdentityHandle,
    ) -> Result<Self, LedgerError> {
        let scale = 10u64.checked_pow(precision as u32).ok_or_else(|| {
            LedgerError::InvalidParameter(format!(
                "precision {precision} does not fit a 64-bit supply"
            ))
        })?;
        let initial_supply = whole_units.checked_mul(scale).ok_or_else(|| {
            LedgerError::InvalidParameter(format!(
                "supply {whole_units} at precision {precision} does not fit 64 bits"
            ))
        })?;
        Ok(Self {
            precision,
            initial_supply,
            mint_authority,
            freeze_authority: None,
        })
    }

    pub fn with_freeze_authority(mut self, freeze_authority: IdentityHandle) -> Self {
        self.freeze_authority = Some(freeze_authority);
        self
    }
}

/// Identities of a completed (or partially completed) mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    pub asset_id: AssetId,
    pub holder_account_id: AccountId,
}

/// Whether further minting is possible for an asset.
///
/// Starts `Active`; transitions to `Revoked` exactly once, irreversibly,
/// when an authority-revocation step succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorityState {
    Active,
    Revoked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_hex_roundtrip() {
        let id = AssetId::new([7u8; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", hex::encode([7u8; 32])));
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_asset_id_rejects_wrong_length() {
        let err = serde_json::from_str::<AssetId>("\"0102\"");
        assert!(err.is_err());
        assert!(AssetId::from_slice(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_identity_from_hex() {
        let identity = IdentityHandle::new([5u8; 32]);
        let parsed = IdentityHandle::from_hex(&identity.to_string()).unwrap();
        assert_eq!(parsed, identity);
        assert!(IdentityHandle::from_hex("zz").is_err());
        assert!(IdentityHandle::from_hex("0102").is_err());
    }

    #[test]
    fn test_unique_asset_ids_differ() {
        let a = AssetId::unique();
        let b = AssetId::unique();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fungible_descriptor_raw_units() {
        let descriptor = AssetDescriptor::fungible(9, 1000, IdentityHandle::random()).unwrap();
        assert_eq!(descriptor.initial_supply, 1000 * 10u64.pow(9));
        assert_eq!(descriptor.precision, 9);
        assert!(descriptor.freeze_authority.is_none());
    }

    #[test]
    fn test_fungible_rejects_unrepresentable_supply() {
        // 10^20 alone exceeds u64
        let err = AssetDescriptor::fungible(20, 1, IdentityHandle::random());
        assert!(matches!(err, Err(LedgerError::InvalidParameter(_))));

        // Representable scale, but the product overflows
        let err = AssetDescriptor::fungible(9, u64::MAX / 2, IdentityHandle::random());
        assert!(matches!(err, Err(LedgerError::InvalidParameter(_))));

        // Largest representable scale still works
        let descriptor = AssetDescriptor::fungible(19, 1, IdentityHandle::random()).unwrap();
        assert_eq!(descriptor.initial_supply, 10u64.pow(19));
    }

    #[test]
    fn test_non_fungible_descriptor() {
        let descriptor = AssetDescriptor::non_fungible(IdentityHandle::random());
        assert_eq!(descriptor.precision, 0);
        assert_eq!(descriptor.initial_supply, 1);
    }
}
