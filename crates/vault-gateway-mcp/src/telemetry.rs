// crates/vault-gateway-mcp/src/telemetry.rs
// ============================================================================
// Module: MCP Telemetry Labels
// Description: Stable method and outcome classifications for MCP requests.
// Purpose: Label audit events and log lines consistently.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Label enums shared by the audit log and tracing output. Labels are stable
//! strings; raw method names from callers never reach a label directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// MCP request method classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum McpMethod {
    /// JSON-RPC initialize.
    Initialize,
    /// JSON-RPC ping.
    Ping,
    /// JSON-RPC tools/list.
    ToolsList,
    /// JSON-RPC tools/call.
    ToolsCall,
    /// Client notification.
    Notification,
    /// Invalid or malformed JSON-RPC request.
    Invalid,
    /// Unsupported JSON-RPC method.
    Other,
}

impl McpMethod {
    /// Classifies a raw JSON-RPC method name.
    #[must_use]
    pub fn classify(method: &str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "ping" => Self::Ping,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            other if other.starts_with("notifications/") => Self::Notification,
            _ => Self::Other,
        }
    }

    /// Returns a stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Ping => "ping",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::Notification => "notification",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }
}

/// MCP request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum McpOutcome {
    /// Successful request.
    Ok,
    /// Tool ran but returned an error-flagged result.
    ToolError,
    /// JSON-RPC protocol failure.
    Error,
    /// Rejected before dispatch (missing credentials, oversized body).
    Rejected,
}

impl McpOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ToolError => "tool_error",
            Self::Error => "error",
            Self::Rejected => "rejected",
        }
    }
}

/// Converts a latency to whole milliseconds, saturating.
#[must_use]
pub fn latency_ms(latency: Duration) -> u64 {
    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
