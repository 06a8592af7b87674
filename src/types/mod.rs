pub mod asset;
pub mod metadata;

// Re-export commonly used items
pub use asset::{AccountId, AssetDescriptor, AssetId, AuthorityState, IdentityHandle, MintRecord};
pub use metadata::{Creator, MetadataRef, MAX_ROYALTY_BASIS_POINTS};
