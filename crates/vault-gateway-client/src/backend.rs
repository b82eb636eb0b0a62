// crates/vault-gateway-client/src/backend.rs
// ============================================================================
// Module: Vault Backend Interface
// Description: Async operations offered by the secrets backend.
// Purpose: Decouple tool routing from the concrete HTTP client.
// Dependencies: async-trait, bytes, vault-gateway-core
// ============================================================================

//! ## Overview
//! [`VaultBackend`] is the seam between tool routing and the HTTP adapter.
//! Each method issues exactly one backend call. Implementations are bound to
//! one tenant's credentials for their whole lifetime.

use async_trait::async_trait;
use bytes::Bytes;
use vault_gateway_core::ActivityRecord;
use vault_gateway_core::BackendError;
use vault_gateway_core::ConnectionStatus;
use vault_gateway_core::Item;
use vault_gateway_core::ItemFile;
use vault_gateway_core::PaginatedResult;
use vault_gateway_core::PatchOperation;
use vault_gateway_core::ServerHealth;
use vault_gateway_core::Vault;

/// Operations exposed by a tenant-bound secrets backend.
#[async_trait]
pub trait VaultBackend: Send + Sync {
    /// Lists vaults, optionally filtered by a backend filter expression.
    async fn list_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>, BackendError>;

    /// Fetches one vault.
    async fn get_vault(&self, vault_id: &str) -> Result<Vault, BackendError>;

    /// Lists item summaries in a vault.
    async fn list_items(
        &self,
        vault_id: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Item>, BackendError>;

    /// Fetches one item with fields.
    async fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item, BackendError>;

    /// Creates an item; the owning vault is forced to `vault_id`.
    async fn create_item(&self, vault_id: &str, item: Item) -> Result<Item, BackendError>;

    /// Replaces an item; its id and vault are forced to the path values.
    async fn update_item(
        &self,
        vault_id: &str,
        item_id: &str,
        item: Item,
    ) -> Result<Item, BackendError>;

    /// Applies JSON Patch operations to an item.
    async fn patch_item(
        &self,
        vault_id: &str,
        item_id: &str,
        operations: &[PatchOperation],
    ) -> Result<Item, BackendError>;

    /// Deletes an item.
    async fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<(), BackendError>;

    /// Lists files attached to an item.
    async fn list_files(
        &self,
        vault_id: &str,
        item_id: &str,
        inline_content: bool,
    ) -> Result<Vec<ItemFile>, BackendError>;

    /// Fetches file metadata.
    async fn get_file(
        &self,
        vault_id: &str,
        item_id: &str,
        file_id: &str,
        inline_content: bool,
    ) -> Result<ItemFile, BackendError>;

    /// Downloads raw file content.
    async fn get_file_content(
        &self,
        vault_id: &str,
        item_id: &str,
        file_id: &str,
    ) -> Result<Bytes, BackendError>;

    /// Lists activity records. The backend gives no continuation signal, so
    /// the page never reports more results.
    async fn list_activity(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<PaginatedResult<ActivityRecord>, BackendError>;

    /// Fetches the backend health report.
    async fn get_health(&self) -> Result<ServerHealth, BackendError>;

    /// Calls the heartbeat endpoint and returns its text body.
    async fn heartbeat(&self) -> Result<String, BackendError>;

    /// Probes connectivity through the health endpoint. Never fails.
    async fn test_connection(&self) -> ConnectionStatus {
        match self.get_health().await {
            Ok(health) => {
                let name = health.name.clone().unwrap_or_else(|| "backend".to_string());
                let message = health.version.as_deref().map_or_else(
                    || format!("connected to {name}"),
                    |version| format!("connected to {name} {version}"),
                );
                ConnectionStatus {
                    connected: true,
                    message,
                    name: health.name,
                    version: health.version,
                }
            }
            Err(err) => ConnectionStatus {
                connected: false,
                message: err.to_string(),
                name: None,
                version: None,
            },
        }
    }
}
