// crates/vault-gateway-mcp/src/lib.rs
// ============================================================================
// Module: Vault Gateway MCP Library
// Description: MCP server, tool router, and response formatting.
// Purpose: Expose the secrets backend as MCP tools over HTTP.
// Dependencies: crate::{audit, auth, format, server, telemetry, tools, validation}
// ============================================================================

//! ## Overview
//! This crate accepts MCP JSON-RPC requests over HTTP, resolves the caller's
//! backend credentials from request headers, and routes each tool call to a
//! freshly built [`vault_gateway_client::ConnectClient`]. Tool results are
//! rendered as Markdown or JSON text blocks; backend failures surface as
//! error-flagged results rather than protocol errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod format;
pub mod server;
pub mod telemetry;
pub mod tools;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::McpAuditEvent;
pub use audit::McpAuditSink;
pub use audit::McpFileAuditSink;
pub use audit::McpNoopAuditSink;
pub use audit::McpStderrAuditSink;
pub use auth::RequestContext;
pub use format::EntityKind;
pub use format::ResponseFormat;
pub use format::ToolContent;
pub use format::ToolOutput;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
