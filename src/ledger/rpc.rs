use crate::error::LedgerError;
use crate::ledger::{Confirmation, LedgerClient};
use crate::types::{AccountId, AssetId, IdentityHandle, MetadataRef};
use crate::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Call envelope sent to the ledger node (JSON-RPC 2.0).
#[derive(Debug, Serialize)]
struct LedgerCall<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

/// Reply envelope from the ledger node. Exactly one of `result` and
/// `error` is set.
#[derive(Debug, Deserialize)]
struct LedgerReply {
    result: Option<Value>,
    error: Option<LedgerFault>,
}

/// Node-side fault carried in a reply envelope.
#[derive(Debug, Deserialize)]
struct LedgerFault {
    code: i32,
    message: String,
}

/// Response envelope for submitted operations
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    pub message: Option<String>,
    pub submission_id: Option<String>,
}

impl SubmitResponse {
    fn accepted(&self) -> bool {
        self.status == "accepted" || self.status == "success"
    }

    fn into_rejection(self) -> LedgerError {
        LedgerError::Rejected {
            status: self.status,
            message: self.message,
        }
    }

    fn submission_id(&self) -> Result<&str, LedgerError> {
        self.submission_id
            .as_deref()
            .ok_or_else(|| LedgerError::Network("Missing submission id".to_string()))
    }
}

/// Response envelope for account creation
#[derive(Debug, Deserialize)]
pub struct EnsureAccountResponse {
    pub status: String,
    pub message: Option<String>,
    pub created: bool,
    pub submission_id: Option<String>,
}

/// Confirmation polling response
#[derive(Debug, Deserialize)]
pub struct GetConfirmationResponse {
    pub status: String,
    pub confirmation: Option<ConfirmationDto>,
}

/// Confirmation DTO
#[derive(Debug, Deserialize)]
pub struct ConfirmationDto {
    pub tx_hash: String,
    pub block_height: u64,
}

impl ConfirmationDto {
    /// Convert to domain model
    pub fn to_domain(&self) -> Result<Confirmation, LedgerError> {
        if self.tx_hash.is_empty() {
            return Err(LedgerError::InvalidParameter(
                "Confirmation with empty tx hash".to_string(),
            ));
        }
        Ok(Confirmation {
            tx_hash: self.tx_hash.clone(),
            block_height: self.block_height,
        })
    }
}

/// [`LedgerClient`] over a JSON-RPC ledger node.
///
/// Every mutating operation is submitted, checked against the node's
/// accept/reject envelope, then polled until the node reports a durable
/// confirmation. A confirmation that never arrives within the configured
/// window surfaces as [`LedgerError::Timeout`]; nothing is retried here.
#[derive(Clone)]
pub struct RpcLedgerClient {
    http: reqwest::Client,
    url: String,
    next_call_id: Arc<AtomicU64>,
    confirmation_timeout: Duration,
    poll_interval: Duration,
}

impl RpcLedgerClient {
    /// Create a client from explicit configuration.
    pub fn new(config: &Config) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: config.endpoint_url.clone(),
            next_call_id: Arc::new(AtomicU64::new(1)),
            confirmation_timeout: Duration::from_secs(config.timeout_seconds),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Create a client for an endpoint with default timings.
    pub fn connect(endpoint_url: impl Into<String>) -> Result<Self, LedgerError> {
        Self::new(&Config::new(endpoint_url.into()))
    }

    /// Get the endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one call to the node and unwrap the reply envelope.
    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let call = LedgerCall {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_call_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&call)
            .send()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Network(format!("HTTP error: {status}")));
        }

        let reply: LedgerReply = response
            .json()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        if let Some(fault) = reply.error {
            return Err(LedgerError::JsonRpc {
                code: fault.code,
                message: fault.message,
            });
        }

        reply
            .result
            .ok_or_else(|| LedgerError::Network("Empty reply from ledger node".to_string()))
    }

    /// Poll until the node confirms the submission or the window elapses.
    async fn wait_for_confirmation(&self, submission_id: &str) -> Result<Confirmation, LedgerError> {
        let start = std::time::Instant::now();

        loop {
            if start.elapsed() > self.confirmation_timeout {
                return Err(LedgerError::Timeout(self.confirmation_timeout.as_secs()));
            }

            match self.get_confirmation(submission_id).await {
                Ok(Some(confirmation)) => return Ok(confirmation),
                Ok(None) => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    // Transient poll errors are retried until the window closes
                    tracing::debug!("Error polling confirmation: {}", e);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Fetch the confirmation for a submission, if the node has one.
    async fn get_confirmation(
        &self,
        submission_id: &str,
    ) -> Result<Option<Confirmation>, LedgerError> {
        let params = json!({ "submission_id": submission_id });
        let response = self.call("get_confirmation", params).await?;
        let response: GetConfirmationResponse =
            serde_json::from_value(response).map_err(LedgerError::Json)?;

        if let Some(dto) = response.confirmation {
            Ok(Some(dto.to_domain()?))
        } else {
            Ok(None)
        }
    }

    /// Submit a mutating operation and await its confirmation.
    async fn submit_and_confirm(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Confirmation, LedgerError> {
        let response = self.call(method, params).await?;
        let response: SubmitResponse =
            serde_json::from_value(response).map_err(LedgerError::Json)?;

        if !response.accepted() {
            return Err(response.into_rejection());
        }

        let submission_id = response.submission_id()?;
        self.wait_for_confirmation(submission_id).await
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn create_asset(
        &self,
        precision: u8,
        mint_authority: &IdentityHandle,
        freeze_authority: Option<&IdentityHandle>,
    ) -> Result<AssetId, LedgerError> {
        // The fresh identity is generated client-side and registered with
        // the node, like a locally generated mint keypair.
        let asset_id = AssetId::unique();

        let params = json!({
            "asset_id": asset_id,
            "precision": precision,
            "mint_authority": mint_authority,
            "freeze_authority": freeze_authority,
        });

        self.submit_and_confirm("create_asset", params).await?;
        Ok(asset_id)
    }

    async fn ensure_account_exists(
        &self,
        account_id: &AccountId,
        owner: &IdentityHandle,
        asset_id: &AssetId,
    ) -> Result<bool, LedgerError> {
        let params = json!({
            "account_id": account_id,
            "owner": owner,
            "asset_id": asset_id,
        });

        let response = self.call("ensure_account", params).await?;
        let response: EnsureAccountResponse =
            serde_json::from_value(response).map_err(LedgerError::Json)?;

        if response.status != "accepted" && response.status != "success" {
            return Err(LedgerError::Rejected {
                status: response.status,
                message: response.message,
            });
        }

        // Creation submits a transaction to confirm; an existing account
        // is a no-op with nothing to wait on.
        if response.created {
            if let Some(submission_id) = response.submission_id.as_deref() {
                self.wait_for_confirmation(submission_id).await?;
            }
        }

        Ok(response.created)
    }

    async fn mint(
        &self,
        asset_id: &AssetId,
        destination: &AccountId,
        authority: &IdentityHandle,
        amount: u64,
    ) -> Result<Confirmation, LedgerError> {
        let params = json!({
            "asset_id": asset_id,
            "destination": destination,
            "authority": authority,
            "amount": amount,
        });

        self.submit_and_confirm("mint", params).await
    }

    async fn revoke_mint_authority(
        &self,
        asset_id: &AssetId,
        current_authority: &IdentityHandle,
    ) -> Result<Confirmation, LedgerError> {
        let params = json!({
            "asset_id": asset_id,
            "current_authority": current_authority,
            "new_authority": Value::Null,
        });

        self.submit_and_confirm("set_mint_authority", params).await
    }

    async fn attach_metadata(
        &self,
        asset_id: &AssetId,
        metadata: &MetadataRef,
    ) -> Result<Confirmation, LedgerError> {
        let params = json!({
            "asset_id": asset_id,
            "metadata": metadata,
        });

        self.submit_and_confirm("attach_metadata", params).await
    }
}
