// crates/vault-gateway-contract/src/lib.rs
// ============================================================================
// Module: Vault Gateway Contract Library
// Description: Tool contracts exposed over MCP.
// Purpose: Single source of truth for tool names, descriptions, and schemas.
// Dependencies: crate::{tooling, types}
// ============================================================================

//! ## Overview
//! The contract crate describes the MCP tool surface: one contract per tool
//! with its description, JSON Schema input contract and behavior hints. The
//! router compiles these schemas to validate arguments before dispatch.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tooling::tool_contract;
pub use tooling::tool_contracts;
pub use tooling::tool_definitions;
pub use types::ToolAnnotations;
pub use types::ToolContract;
pub use types::ToolDefinition;
pub use vault_gateway_core::ToolName;
