// crates/vault-gateway-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured audit events for MCP request handling.
// Purpose: Emit redacted JSON-line audit records per request.
// Dependencies: serde, serde_json, vault-gateway-config
// ============================================================================

//! ## Overview
//! One [`McpAuditEvent`] is recorded per MCP request. Events carry a token
//! fingerprint instead of the token itself and never include tool arguments
//! or results, since both may hold secret values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use vault_gateway_config::AuditConfig;
use vault_gateway_config::AuditSinkKind;
use vault_gateway_core::ToolName;

use crate::telemetry::McpMethod;
use crate::telemetry::McpOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// MCP audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct McpAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: McpMethod,
    /// Tool name when available (tools/call).
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Backend error code for error-flagged tool results.
    pub error_kind: Option<String>,
    /// Token fingerprint identifying the tenant.
    pub tenant: Option<String>,
    /// Backend host the request targeted.
    pub backend_host: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Handling latency in milliseconds.
    pub latency_ms: u64,
}

/// Inputs for building an [`McpAuditEvent`].
#[derive(Debug, Clone)]
pub struct McpAuditEventParams {
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: McpMethod,
    /// Tool name when available.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Backend error code when present.
    pub error_kind: Option<String>,
    /// Token fingerprint.
    pub tenant: Option<String>,
    /// Backend host.
    pub backend_host: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Handling latency in milliseconds.
    pub latency_ms: u64,
}

impl McpAuditEvent {
    /// Builds an audit event stamped with the current time.
    #[must_use]
    pub fn new(params: McpAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
        Self {
            event: "mcp_request",
            timestamp_ms,
            request_id: params.request_id,
            peer_ip: params.peer_ip,
            method: params.method,
            tool: params.tool,
            outcome: params.outcome,
            error_code: params.error_code,
            error_kind: params.error_kind,
            tenant: params.tenant,
            backend_host: params.backend_host,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
            latency_ms: params.latency_ms,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for MCP request events.
pub trait McpAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &McpAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct McpStderrAuditSink;

impl McpAuditSink for McpStderrAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct McpFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl McpFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl McpAuditSink for McpFileAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct McpNoopAuditSink;

impl McpAuditSink for McpNoopAuditSink {
    fn record(&self, _event: &McpAuditEvent) {}
}

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error when a file sink cannot open its path.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn McpAuditSink>> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(McpStderrAuditSink)),
        AuditSinkKind::None => Ok(Arc::new(McpNoopAuditSink)),
        AuditSinkKind::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "audit.path required for file sink")
            })?;
            Ok(Arc::new(McpFileAuditSink::new(path)?))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
