// crates/vault-gateway-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool routing from MCP calls to backend operations.
// Purpose: Validate arguments, call the backend, and render results.
// Dependencies: base64, serde, vault-gateway-client, vault-gateway-contract
// ============================================================================

//! ## Overview
//! The tool router maps each MCP tool onto one backend operation. Every call
//! validates its arguments against the tool's input schema, decodes them into
//! a typed request, invokes the backend handed in for that call, and renders
//! the result as a single text block.
//!
//! ## Invariants
//! - Only an unknown tool name fails the call; every other failure becomes an
//!   error-flagged [`ToolOutput`].
//! - The router holds no tenant state; the backend is supplied per call.
//! - `test_connection` reports status and never yields an error block.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use vault_gateway_client::VaultBackend;
use vault_gateway_config::ResponseLimits;
use vault_gateway_contract::ToolDefinition;
use vault_gateway_contract::tool_definitions;
use vault_gateway_core::BackendError;
use vault_gateway_core::Item;
use vault_gateway_core::ItemCategory;
use vault_gateway_core::ItemField;
use vault_gateway_core::ItemSection;
use vault_gateway_core::ItemUrl;
use vault_gateway_core::PaginatedResult;
use vault_gateway_core::PatchOperation;
use vault_gateway_core::ToolName;
use vault_gateway_core::VaultRef;

use crate::format::EntityKind;
use crate::format::ResponseFormat;
use crate::format::ToolOutput;
use crate::format::render;
use crate::format::render_error;
use crate::format::truncate_to_limit;
use crate::validation::ArgumentValidators;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Error code used when a result cannot be serialized.
const CODE_SERIALIZATION: &str = "SERIALIZATION_ERROR";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool routing failures surfaced as JSON-RPC errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool name not recognized.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Router construction failed.
    #[error("tool router initialization failed: {0}")]
    Init(String),
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Routes MCP tool calls to a backend.
#[derive(Clone)]
pub struct ToolRouter {
    /// Shared immutable router state.
    inner: Arc<RouterInner>,
}

/// Immutable router state shared across calls.
struct RouterInner {
    /// Response shaping limits.
    limits: ResponseLimits,
    /// Advertised tool definitions.
    definitions: Vec<ToolDefinition>,
    /// Compiled argument validators.
    validators: ArgumentValidators,
}

impl ToolRouter {
    /// Builds a router, compiling every tool input schema.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Init`] when a schema fails to compile.
    pub fn new(limits: ResponseLimits) -> Result<Self, ToolError> {
        let definitions = tool_definitions();
        let validators = ArgumentValidators::compile(&definitions).map_err(ToolError::Init)?;
        Ok(Self {
            inner: Arc::new(RouterInner {
                limits,
                definitions,
                validators,
            }),
        })
    }

    /// Returns the response limits.
    #[must_use]
    pub fn limits(&self) -> ResponseLimits {
        self.inner.limits
    }

    /// Returns tool definitions in canonical order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.inner.definitions.clone()
    }

    /// Handles a tool call by name with JSON arguments.
    ///
    /// Null arguments are treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] when `name` is not a known tool.
    pub async fn handle_tool_call(
        &self,
        backend: &dyn VaultBackend,
        name: &str,
        arguments: Value,
    ) -> Result<ToolOutput, ToolError> {
        let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let arguments = if arguments.is_null() { Value::Object(Map::new()) } else { arguments };
        let output = match self.dispatch(backend, tool, arguments).await {
            Ok(text) => {
                ToolOutput::text(truncate_to_limit(text, self.inner.limits.character_limit))
            }
            Err(err) => {
                tracing::debug!(tool = %tool, code = err.code(), "tool call failed");
                render_error(&err)
            }
        };
        Ok(output)
    }

    async fn dispatch(
        &self,
        backend: &dyn VaultBackend,
        tool: ToolName,
        arguments: Value,
    ) -> Result<String, BackendError> {
        match tool {
            ToolName::ListVaults => {
                let request: ListRequest = self.decode(tool, arguments)?;
                let (offset, limit) = self.window(request.limit, request.offset)?;
                let vaults = backend.list_vaults(request.filter.as_deref()).await?;
                let page = PaginatedResult::from_page(vaults, offset, limit);
                respond(&page, request.response_format, EntityKind::Vault)
            }
            ToolName::GetVault => {
                let request: VaultRequest = self.decode(tool, arguments)?;
                let vault = backend.get_vault(&request.vault_id).await?;
                respond(&vault, request.response_format, EntityKind::Vault)
            }
            ToolName::ListItems => {
                let request: ListItemsRequest = self.decode(tool, arguments)?;
                let (offset, limit) = self.window(request.limit, request.offset)?;
                let items = backend.list_items(&request.vault_id, request.filter.as_deref()).await?;
                let page = PaginatedResult::from_page(items, offset, limit);
                respond(&page, request.response_format, EntityKind::Item)
            }
            ToolName::GetItem => {
                let request: ItemRequest = self.decode(tool, arguments)?;
                let item = backend.get_item(&request.vault_id, &request.item_id).await?;
                respond(&item, request.response_format, EntityKind::Item)
            }
            ToolName::CreateItem => {
                let request: ItemWriteRequest = self.decode(tool, arguments)?;
                let format = request.response_format;
                let vault_id = request.vault_id.clone();
                let created = backend.create_item(&vault_id, request.into_item(None)).await?;
                respond(&created, format, EntityKind::Item)
            }
            ToolName::UpdateItem => {
                let request: ItemWriteRequest = self.decode(tool, arguments)?;
                let format = request.response_format;
                let vault_id = request.vault_id.clone();
                let item_id = request.item_id.clone().ok_or_else(|| missing_argument("itemId"))?;
                let item = request.into_item(Some(item_id.clone()));
                let updated = backend.update_item(&vault_id, &item_id, item).await?;
                respond(&updated, format, EntityKind::Item)
            }
            ToolName::PatchItem => {
                let request: PatchItemRequest = self.decode(tool, arguments)?;
                let patched = backend
                    .patch_item(&request.vault_id, &request.item_id, &request.operations)
                    .await?;
                respond(&patched, request.response_format, EntityKind::Item)
            }
            ToolName::DeleteItem => {
                let request: ItemRequest = self.decode(tool, arguments)?;
                backend.delete_item(&request.vault_id, &request.item_id).await?;
                let confirmation = json!({
                    "deleted": true,
                    "vaultId": request.vault_id,
                    "itemId": request.item_id,
                });
                Ok(render(&confirmation, request.response_format, EntityKind::Deletion))
            }
            ToolName::ListFiles => {
                let request: ListFilesRequest = self.decode(tool, arguments)?;
                let (offset, limit) = self.window(request.limit, request.offset)?;
                let files = backend
                    .list_files(&request.vault_id, &request.item_id, request.inline_content)
                    .await?;
                let page = PaginatedResult::from_page(files, offset, limit);
                respond(&page, request.response_format, EntityKind::File)
            }
            ToolName::GetFile => {
                let request: FileRequest = self.decode(tool, arguments)?;
                let file = backend
                    .get_file(
                        &request.vault_id,
                        &request.item_id,
                        &request.file_id,
                        request.inline_content,
                    )
                    .await?;
                respond(&file, request.response_format, EntityKind::File)
            }
            ToolName::GetFileContent => {
                let request: FileContentRequest = self.decode(tool, arguments)?;
                let bytes = backend
                    .get_file_content(&request.vault_id, &request.item_id, &request.file_id)
                    .await?;
                let download = FileDownload::new(request.file_id, &bytes);
                respond(&download, request.response_format, EntityKind::FileContent)
            }
            ToolName::ListActivity => {
                let request: ActivityRequest = self.decode(tool, arguments)?;
                let (offset, limit) = self.window(request.limit, request.offset)?;
                let page = backend.list_activity(Some(limit), Some(offset)).await?;
                respond(&page, request.response_format, EntityKind::Activity)
            }
            ToolName::GetHealth => {
                let request: FormatRequest = self.decode(tool, arguments)?;
                let health = backend.get_health().await?;
                respond(&health, request.response_format, EntityKind::Health)
            }
            ToolName::Heartbeat => {
                let request: FormatRequest = self.decode(tool, arguments)?;
                let beat = backend.heartbeat().await?;
                let payload = json!({"heartbeat": beat});
                Ok(render(&payload, request.response_format, EntityKind::Heartbeat))
            }
            ToolName::TestConnection => {
                let request: FormatRequest = self.decode(tool, arguments)?;
                let status = backend.test_connection().await;
                respond(&status, request.response_format, EntityKind::Connection)
            }
        }
    }

    /// Validates then decodes tool arguments.
    fn decode<T: DeserializeOwned>(
        &self,
        tool: ToolName,
        arguments: Value,
    ) -> Result<T, BackendError> {
        self.inner.validators.validate(tool, &arguments)?;
        serde_json::from_value(arguments).map_err(|err| {
            let mut fields = BTreeMap::new();
            fields.insert("arguments".to_string(), vec![err.to_string()]);
            BackendError::validation(format!("invalid arguments for {tool}"), fields)
        })
    }

    /// Resolves `(offset, limit)` against configured page sizes.
    fn window(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<(usize, usize), BackendError> {
        let limits = &self.inner.limits;
        let limit = limit.unwrap_or(limits.default_page_size);
        if limit == 0 || limit > limits.max_page_size {
            let mut fields = BTreeMap::new();
            fields.insert(
                "limit".to_string(),
                vec![format!("must be between 1 and {}", limits.max_page_size)],
            );
            return Err(BackendError::validation("invalid page size", fields));
        }
        Ok((offset.unwrap_or(0), limit))
    }
}

/// Serializes a result and renders it.
fn respond<T: Serialize>(
    payload: &T,
    format: ResponseFormat,
    kind: EntityKind,
) -> Result<String, BackendError> {
    let value = serde_json::to_value(payload).map_err(|err| BackendError::Api {
        message: format!("failed to serialize response: {err}"),
        status: None,
        code: CODE_SERIALIZATION.to_string(),
        retryable: false,
    })?;
    Ok(render(&value, format, kind))
}

fn missing_argument(name: &str) -> BackendError {
    let mut fields = BTreeMap::new();
    fields.insert(name.to_string(), vec!["is required".to_string()]);
    BackendError::validation("missing required argument", fields)
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `list_vaults`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListRequest {
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments naming one vault.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct VaultRequest {
    vault_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `list_items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListItemsRequest {
    vault_id: String,
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments naming one item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ItemRequest {
    vault_id: String,
    item_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `create_item` and `update_item`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ItemWriteRequest {
    vault_id: String,
    #[serde(default)]
    item_id: Option<String>,
    title: String,
    category: ItemCategory,
    #[serde(default)]
    urls: Option<Vec<ItemUrl>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    favorite: Option<bool>,
    #[serde(default)]
    sections: Option<Vec<ItemSection>>,
    #[serde(default)]
    fields: Option<Vec<ItemField>>,
    #[serde(default)]
    response_format: ResponseFormat,
}

impl ItemWriteRequest {
    fn into_item(self, id: Option<String>) -> Item {
        Item {
            id,
            title: self.title,
            category: self.category,
            vault: VaultRef::id(self.vault_id),
            urls: self.urls,
            favorite: self.favorite,
            tags: self.tags,
            version: None,
            state: None,
            sections: self.sections,
            fields: self.fields,
            files: None,
            created_at: None,
            updated_at: None,
            last_edited_by: None,
            extra: Map::new(),
        }
    }
}

/// Arguments for `patch_item`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PatchItemRequest {
    vault_id: String,
    item_id: String,
    operations: Vec<PatchOperation>,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `list_files`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListFilesRequest {
    vault_id: String,
    item_id: String,
    #[serde(default)]
    inline_content: bool,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `get_file`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FileRequest {
    vault_id: String,
    item_id: String,
    file_id: String,
    #[serde(default)]
    inline_content: bool,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `get_file_content`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FileContentRequest {
    vault_id: String,
    item_id: String,
    file_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments for `list_activity`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ActivityRequest {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Arguments carrying only a response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FormatRequest {
    #[serde(default)]
    response_format: ResponseFormat,
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Downloaded file content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDownload {
    /// File identifier.
    file_id: String,
    /// Content size in bytes.
    size: usize,
    /// `utf-8` or `base64`.
    encoding: &'static str,
    /// Text or base64 content.
    content: String,
}

impl FileDownload {
    fn new(file_id: String, bytes: &[u8]) -> Self {
        let (encoding, content) = match std::str::from_utf8(bytes) {
            Ok(text) => ("utf-8", text.to_string()),
            Err(_) => ("base64", STANDARD.encode(bytes)),
        };
        Self {
            file_id,
            size: bytes.len(),
            encoding,
            content,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
