//! # Mintflow SDK
//!
//! A minting workflow orchestrator for on-chain assets. The SDK sequences
//! the steps shared by every mint — create the asset record, establish the
//! holder's account, mint the initial supply, optionally revoke the mint
//! authority and attach metadata — over a narrow [`LedgerClient`] boundary
//! that owns all network I/O and cryptography.
//!
//! ## Features
//!
//! - Fungible and non-fungible asset minting with one workflow
//! - Deterministic holder-account derivation
//! - Irreversible mint-authority revocation for fixed-supply assets
//! - Off-chain metadata references with royalty and creator shares
//! - Async JSON-RPC ledger client with confirmation polling
//! - In-memory ledger for tests and local development
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mintflow::ledger::RpcLedgerClient;
//! use mintflow::types::{AssetDescriptor, IdentityHandle};
//! use mintflow::workflow::{MintOptions, MintWorkflow};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a ledger client for the local node
//!     let client = RpcLedgerClient::connect("http://localhost:8899")?;
//!     let workflow = MintWorkflow::new(Arc::new(client));
//!
//!     // Mint a non-fungible unit and lock its supply
//!     let owner = IdentityHandle::random();
//!     let outcome = workflow
//!         .mint_asset(
//!             &owner,
//!             &AssetDescriptor::non_fungible(owner.clone()),
//!             MintOptions {
//!                 revoke_authority: true,
//!                 metadata: None,
//!             },
//!         )
//!         .await?;
//!
//!     println!("Minted asset {}", outcome.record.asset_id);
//!     Ok(())
//! }
//! ```

// Re-export all public modules
pub mod error;
pub mod ledger;
pub mod types;
pub mod workflow;

// Re-export commonly used items at crate root
pub use error::{LedgerError, WorkflowError};
pub use ledger::{Confirmation, InMemoryLedger, LedgerClient, RpcLedgerClient};
pub use types::{
    AccountId, AssetDescriptor, AssetId, AuthorityState, IdentityHandle, MetadataRef, MintRecord,
};
pub use workflow::{MintBuilder, MintOptions, MintOutcome, MintWorkflow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the SDK (sets up logging if enabled)
pub fn init() {
    // Initialize tracing subscriber for logging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// SDK configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the ledger node
    pub endpoint_url: String,
    /// Per-request and confirmation-window timeout
    pub timeout_seconds: u64,
    /// Confirmation poll interval
    pub poll_interval_ms: u64,
}

impl Config {
    /// Create a new configuration
    pub fn new(endpoint_url: String) -> Self {
        Self {
            endpoint_url,
            timeout_seconds: 30,
            poll_interval_ms: 500,
        }
    }

    /// Create configuration for local development
    pub fn local() -> Self {
        Self::new("http://localhost:8899".to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::local()
    }
}
