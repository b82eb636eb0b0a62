// crates/vault-gateway-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: Streamable HTTP MCP server for Vault Gateway tools.
// Purpose: Expose the tool router via JSON-RPC 2.0 over axum.
// Dependencies: axum, tokio, vault-gateway-client, vault-gateway-config
// ============================================================================

//! ## Overview
//! The MCP server accepts JSON-RPC 2.0 requests on `POST /mcp`. Each request
//! must carry backend credentials in its headers; requests without them are
//! answered with `401` before the body is parsed. Tool calls build a fresh
//! [`ConnectClient`] from the request's credentials over a shared,
//! tenant-agnostic connection pool. `GET /health` is an unauthenticated
//! liveness probe.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::body::to_bytes;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use vault_gateway_client::ConnectClient;
use vault_gateway_client::build_http_client;
use vault_gateway_config::GatewayConfig;
use vault_gateway_contract::ToolDefinition;
use vault_gateway_core::MissingCredentials;
use vault_gateway_core::ToolName;

use crate::audit::McpAuditEvent;
use crate::audit::McpAuditEventParams;
use crate::audit::McpAuditSink;
use crate::audit::audit_sink_from_config;
use crate::auth::REQUIRED_HEADERS;
use crate::auth::RequestContext;
use crate::auth::WWW_AUTHENTICATE_CHALLENGE;
use crate::auth::missing_headers;
use crate::telemetry::McpMethod;
use crate::telemetry::McpOutcome;
use crate::telemetry::latency_ms;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// MCP protocol revision advertised by `initialize`.
pub const PROTOCOL_VERSION: &str = "2025-06-18";
/// Server name advertised by `initialize`.
pub const SERVER_NAME: &str = "vault-gateway";
/// JSON-RPC parse error.
const CODE_PARSE_ERROR: i64 = -32700;
/// JSON-RPC invalid request.
const CODE_INVALID_REQUEST: i64 = -32600;
/// JSON-RPC method not found.
const CODE_METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC invalid params.
const CODE_INVALID_PARAMS: i64 = -32602;
/// Missing tenant credentials.
const CODE_UNAUTHENTICATED: i64 = -32001;
/// Result serialization failed.
const CODE_SERIALIZATION: i64 = -32060;
/// Request body over the configured limit.
const CODE_BODY_TOO_LARGE: i64 = -32070;
/// Body used when a response cannot be serialized.
const SERIALIZATION_FALLBACK: &[u8] =
    b"{\"jsonrpc\":\"2.0\",\"id\":null,\"error\":{\"code\":-32060,\"message\":\"serialization failed\"}}";

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Server configuration.
    config: GatewayConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when configuration is invalid or the audit
    /// sink, HTTP client or tool router cannot initialize.
    pub fn from_config(config: GatewayConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let audit = audit_sink_from_config(&config.audit)
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        Self::with_audit_sink(config, audit)
    }

    /// Builds a server with an explicit audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the HTTP client or tool router cannot
    /// initialize.
    pub fn with_audit_sink(
        config: GatewayConfig,
        audit: Arc<dyn McpAuditSink>,
    ) -> Result<Self, McpServerError> {
        let router =
            ToolRouter::new(config.limits).map_err(|err| McpServerError::Init(err.to_string()))?;
        let http = build_http_client(&config.backend)
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        let state = Arc::new(ServerState {
            router,
            http,
            max_body_bytes: config.server.max_body_bytes,
            audit,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the axum application.
    #[must_use]
    pub fn app(&self) -> Router {
        build_app(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        let addr = self
            .config
            .server
            .bind_addr()
            .map_err(|err| McpServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| McpServerError::Transport(format!("http bind failed: {err}")))?;
        self.serve_with_listener(listener).await
    }

    /// Serves on an already bound listener until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when serving fails.
    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<(), McpServerError> {
        if let Ok(local) = listener.local_addr() {
            tracing::info!(addr = %local, "vault gateway listening");
        }
        let app = self.app();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| McpServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

/// Builds the router for the MCP and health endpoints.
fn build_app(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(handle_health))
        .with_state(state)
}

// ============================================================================
// SECTION: HTTP Handlers
// ============================================================================

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Tenant-agnostic HTTP connection pool.
    http: Client,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Audit sink for request events.
    audit: Arc<dyn McpAuditSink>,
}

/// Handles MCP JSON-RPC requests.
async fn handle_mcp(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let context = RequestContext::from_headers(Some(peer.ip()), &headers);
    process_request(&state, context, body).await
}

/// Liveness probe.
async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Runs one request end to end: dispatch, serialize, audit.
///
/// Credentials are checked before the body is read; the body is read up to
/// the configured limit.
async fn process_request(state: &ServerState, context: RequestContext, body: Body) -> Response {
    let started = Instant::now();
    let mut exchange = Exchange::default();
    let reply = route_request(state, &context, body, &mut exchange).await;
    let payload = reply
        .body
        .as_ref()
        .map(|body| serde_json::to_vec(body).unwrap_or_else(|_| SERIALIZATION_FALLBACK.to_vec()))
        .unwrap_or_default();
    let derived = if reply.is_error() { McpOutcome::Error } else { McpOutcome::Ok };
    let outcome = exchange.outcome.unwrap_or(derived);
    let event = McpAuditEvent::new(McpAuditEventParams {
        request_id: exchange.request_id,
        peer_ip: context.peer_ip.map(|ip| ip.to_string()),
        method: exchange.method,
        tool: exchange.tool,
        outcome,
        error_code: reply.error_code(),
        error_kind: exchange.error_kind,
        tenant: context.tenant(),
        backend_host: context.credentials.backend_host.clone(),
        request_bytes: exchange.request_bytes,
        response_bytes: payload.len(),
        latency_ms: latency_ms(started.elapsed()),
    });
    tracing::debug!(
        method = event.method.as_str(),
        outcome = event.outcome.as_str(),
        latency_ms = event.latency_ms,
        "mcp request handled"
    );
    state.audit.record(&event);
    reply.into_http(payload)
}

/// Audit facts gathered while routing.
struct Exchange {
    /// Method classification.
    method: McpMethod,
    /// Tool name for tools/call.
    tool: Option<ToolName>,
    /// JSON-RPC id rendered as text.
    request_id: Option<String>,
    /// Backend error code for error-flagged tool results.
    error_kind: Option<String>,
    /// Outcome override; derived from the reply when unset.
    outcome: Option<McpOutcome>,
    /// Request body bytes read.
    request_bytes: usize,
}

impl Default for Exchange {
    fn default() -> Self {
        Self {
            method: McpMethod::Invalid,
            tool: None,
            request_id: None,
            error_kind: None,
            outcome: None,
            request_bytes: 0,
        }
    }
}

/// Authenticates, parses and dispatches one request.
async fn route_request(
    state: &ServerState,
    context: &RequestContext,
    body: Body,
    exchange: &mut Exchange,
) -> McpReply {
    if let Err(missing) = context.credentials.validate() {
        exchange.outcome = Some(McpOutcome::Rejected);
        return McpReply::unauthorized(&missing);
    }
    let Ok(bytes) = to_bytes(body, state.max_body_bytes).await else {
        exchange.outcome = Some(McpOutcome::Rejected);
        return McpReply::error(
            StatusCode::PAYLOAD_TOO_LARGE,
            Value::Null,
            CODE_BODY_TOO_LARGE,
            "request body too large".to_string(),
        );
    };
    exchange.request_bytes = bytes.len();
    let Ok(raw) = serde_json::from_slice::<Value>(bytes.as_ref()) else {
        return McpReply::error(
            StatusCode::BAD_REQUEST,
            Value::Null,
            CODE_PARSE_ERROR,
            "parse error".to_string(),
        );
    };
    let Ok(request) = serde_json::from_value::<JsonRpcRequest>(raw) else {
        return McpReply::error(
            StatusCode::BAD_REQUEST,
            Value::Null,
            CODE_INVALID_REQUEST,
            "invalid json-rpc request".to_string(),
        );
    };
    exchange.method = McpMethod::classify(&request.method);
    exchange.request_id = request.id.as_ref().map(Value::to_string);
    if request.jsonrpc != "2.0" {
        return McpReply::error(
            StatusCode::BAD_REQUEST,
            request.id.unwrap_or(Value::Null),
            CODE_INVALID_REQUEST,
            "invalid json-rpc version".to_string(),
        );
    }
    if exchange.method == McpMethod::Notification {
        return McpReply::accepted();
    }
    let id = request.id.unwrap_or(Value::Null);
    match request.method.as_str() {
        "initialize" => McpReply::result(id, &initialize_result()),
        "ping" => McpReply::result(id, &json!({})),
        "tools/list" => McpReply::result(id, &ToolListResult {
            tools: state.router.list_tools(),
        }),
        "tools/call" => {
            let params = request.params.unwrap_or(Value::Null);
            let Ok(call) = serde_json::from_value::<ToolCallParams>(params) else {
                return McpReply::error(
                    StatusCode::BAD_REQUEST,
                    id,
                    CODE_INVALID_PARAMS,
                    "invalid tool params".to_string(),
                );
            };
            exchange.tool = ToolName::parse(&call.name);
            let backend = ConnectClient::new(state.http.clone(), &context.credentials);
            match state.router.handle_tool_call(&backend, &call.name, call.arguments).await {
                Ok(output) => {
                    if output.is_error {
                        exchange.outcome = Some(McpOutcome::ToolError);
                        exchange.error_kind.clone_from(&output.error_code);
                    }
                    McpReply::result(id, &output)
                }
                Err(err) => McpReply::error(
                    StatusCode::BAD_REQUEST,
                    id,
                    CODE_INVALID_PARAMS,
                    err.to_string(),
                ),
            }
        }
        _ => McpReply::error(
            StatusCode::BAD_REQUEST,
            id,
            CODE_METHOD_NOT_FOUND,
            "method not found".to_string(),
        ),
    }
}

/// Result payload for `initialize`.
fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {"tools": {"listChanged": false}},
        "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
        "instructions": "Secrets backend tools. Supply x-connect-token and x-connect-host headers on every request."
    })
}

// ============================================================================
// SECTION: JSON-RPC Types
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; absent on notifications.
    #[serde(default)]
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
    /// Structured error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// HTTP reply before serialization.
struct McpReply {
    /// HTTP status.
    status: StatusCode,
    /// JSON-RPC body; `None` for accepted notifications.
    body: Option<JsonRpcResponse>,
    /// Whether to attach a `WWW-Authenticate` challenge.
    challenge: bool,
}

impl McpReply {
    /// Successful result reply.
    fn result<T: Serialize>(id: Value, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                status: StatusCode::OK,
                body: Some(JsonRpcResponse {
                    jsonrpc: "2.0",
                    id,
                    result: Some(value),
                    error: None,
                }),
                challenge: false,
            },
            Err(_) => Self::error(
                StatusCode::OK,
                id,
                CODE_SERIALIZATION,
                "serialization failed".to_string(),
            ),
        }
    }

    /// JSON-RPC error reply.
    fn error(status: StatusCode, id: Value, code: i64, message: String) -> Self {
        Self {
            status,
            body: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(JsonRpcError {
                    code,
                    message,
                    data: None,
                }),
            }),
            challenge: false,
        }
    }

    /// Credential challenge reply.
    fn unauthorized(missing: &MissingCredentials) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id: Value::Null,
                result: None,
                error: Some(JsonRpcError {
                    code: CODE_UNAUTHENTICATED,
                    message: format!(
                        "missing tenant credentials: provide the {} headers",
                        REQUIRED_HEADERS.join(" and ")
                    ),
                    data: Some(json!({
                        "required_headers": REQUIRED_HEADERS,
                        "missing_headers": missing_headers(missing),
                    })),
                }),
            }),
            challenge: true,
        }
    }

    /// Bodiless reply for notifications.
    const fn accepted() -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            body: None,
            challenge: false,
        }
    }

    /// JSON-RPC error code, if any.
    fn error_code(&self) -> Option<i64> {
        self.body.as_ref().and_then(|body| body.error.as_ref()).map(|error| error.code)
    }

    /// Whether the reply carries a JSON-RPC error.
    fn is_error(&self) -> bool {
        self.error_code().is_some()
    }

    /// Converts into an HTTP response with the serialized payload.
    fn into_http(self, payload: Vec<u8>) -> Response {
        let mut response = if self.body.is_some() {
            let mut response = (self.status, Body::from(payload)).into_response();
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        } else {
            self.status.into_response()
        };
        if self.challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(WWW_AUTHENTICATE_CHALLENGE));
        }
        response
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
