// crates/vault-gateway-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Serializable tool contract records.
// Purpose: Shape tool metadata the way MCP clients expect it.
// Dependencies: serde, serde_json, vault-gateway-core
// ============================================================================

//! ## Overview
//! [`ToolDefinition`] is the `tools/list` wire shape; [`ToolContract`] adds
//! usage notes for documentation output.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use vault_gateway_core::ToolName;

/// MCP tool definition for tool listing.
///
/// # Invariants
/// - `name` is a stable MCP tool identifier.
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Human-friendly title.
    pub title: String,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
    /// Behavior hints.
    pub annotations: ToolAnnotations,
}

/// Behavior hints advertised with each tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    /// Tool never changes backend state.
    pub read_only_hint: bool,
    /// Tool may overwrite or remove data.
    pub destructive_hint: bool,
    /// Repeating the call has no additional effect.
    pub idempotent_hint: bool,
    /// Tool talks to an external system.
    pub open_world_hint: bool,
}

/// Tool contract with usage notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Human-friendly title.
    pub title: String,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// Behavior hints.
    pub annotations: ToolAnnotations,
    /// Notes describing tool usage.
    pub notes: Vec<String>,
}
