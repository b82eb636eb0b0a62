// crates/vault-gateway-core/src/tooling.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for Vault Gateway.
// Purpose: Shared tool naming across contracts, routing, and audit.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical tool identifiers exposed by the gateway.
//! These names are part of the external contract surface.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Canonical tool names for Vault Gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// List vaults visible to the token.
    ListVaults,
    /// Fetch one vault.
    GetVault,
    /// List items in a vault.
    ListItems,
    /// Fetch one item with its fields.
    GetItem,
    /// Create an item.
    CreateItem,
    /// Replace an item.
    UpdateItem,
    /// Apply JSON Patch operations to an item.
    PatchItem,
    /// Delete an item.
    DeleteItem,
    /// List files attached to an item.
    ListFiles,
    /// Fetch file metadata.
    GetFile,
    /// Download raw file content.
    GetFileContent,
    /// List API activity records.
    ListActivity,
    /// Fetch backend health.
    GetHealth,
    /// Ping the backend heartbeat endpoint.
    Heartbeat,
    /// Probe connectivity without failing.
    TestConnection,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListVaults => "list_vaults",
            Self::GetVault => "get_vault",
            Self::ListItems => "list_items",
            Self::GetItem => "get_item",
            Self::CreateItem => "create_item",
            Self::UpdateItem => "update_item",
            Self::PatchItem => "patch_item",
            Self::DeleteItem => "delete_item",
            Self::ListFiles => "list_files",
            Self::GetFile => "get_file",
            Self::GetFileContent => "get_file_content",
            Self::ListActivity => "list_activity",
            Self::GetHealth => "get_health",
            Self::Heartbeat => "heartbeat",
            Self::TestConnection => "test_connection",
        }
    }

    /// Returns all tools in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ListVaults,
            Self::GetVault,
            Self::ListItems,
            Self::GetItem,
            Self::CreateItem,
            Self::UpdateItem,
            Self::PatchItem,
            Self::DeleteItem,
            Self::ListFiles,
            Self::GetFile,
            Self::GetFileContent,
            Self::ListActivity,
            Self::GetHealth,
            Self::Heartbeat,
            Self::TestConnection,
        ]
    }

    /// Parses a canonical tool name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tool| tool.as_str() == name)
    }

    /// Returns true when the tool never mutates backend state.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        !matches!(self, Self::CreateItem | Self::UpdateItem | Self::PatchItem | Self::DeleteItem)
    }

    /// Returns true when the tool may overwrite or remove existing data.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::UpdateItem | Self::PatchItem | Self::DeleteItem)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
