// crates/vault-gateway-mcp/src/server/tests.rs
// ============================================================================
// Module: MCP Server Unit Tests
// Description: Unit tests for credential gating, JSON-RPC handling, and audit.
// Purpose: Validate server request handling without binding a socket.
// Dependencies: vault-gateway-mcp, axum
// ============================================================================

//! ## Overview
//! Drives the request pipeline directly with in-memory bodies and a recording
//! audit sink.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only request assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use axum::body::Body;
use axum::body::to_bytes;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::IntoResponse;
use axum::response::Response;
use reqwest::Client;
use serde_json::Value;
use serde_json::json;
use vault_gateway_config::ResponseLimits;

use super::ServerState;
use super::handle_health;
use super::process_request;
use crate::audit::McpAuditEvent;
use crate::audit::McpAuditSink;
use crate::auth::HOST_HEADER;
use crate::auth::RequestContext;
use crate::auth::TOKEN_HEADER;
use crate::telemetry::McpMethod;
use crate::telemetry::McpOutcome;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

#[derive(Default)]
struct RecordingAuditSink {
    events: Mutex<Vec<McpAuditEvent>>,
}

impl McpAuditSink for RecordingAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

impl RecordingAuditSink {
    fn last(&self) -> McpAuditEvent {
        self.events.lock().unwrap().last().cloned().expect("audit event recorded")
    }
}

fn state(audit: Arc<RecordingAuditSink>) -> ServerState {
    ServerState {
        router: ToolRouter::new(ResponseLimits::default()).unwrap(),
        http: Client::new(),
        max_body_bytes: 4096,
        audit,
    }
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn credentials(token: Option<&'static str>, host: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        headers.insert(TOKEN_HEADER, HeaderValue::from_static(token));
    }
    if let Some(host) = host {
        headers.insert(HOST_HEADER, HeaderValue::from_str(host).unwrap());
    }
    headers
}

async fn send(
    state: &ServerState,
    headers: &HeaderMap,
    body: &Value,
) -> (StatusCode, Value, Response) {
    send_raw(state, headers, body.to_string()).await
}

async fn send_raw(
    state: &ServerState,
    headers: &HeaderMap,
    body: String,
) -> (StatusCode, Value, Response) {
    let context = RequestContext::from_headers(None, headers);
    let response = process_request(state, context, Body::from(body)).await;
    let status = response.status();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let value =
        if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value, Response::from_parts(parts, Body::empty()))
}

fn rpc(method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params})
}

// ============================================================================
// SECTION: Credential Gating
// ============================================================================

#[tokio::test]
async fn missing_credentials_are_rejected_before_dispatch() {
    let audit = Arc::new(RecordingAuditSink::default());
    let state = state(Arc::clone(&audit));
    let (status, body, response) =
        send_raw(&state, &HeaderMap::new(), "not even json".to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let challenge = response.headers().get(WWW_AUTHENTICATE).and_then(|v| v.to_str().ok()).unwrap();
    assert!(challenge.starts_with("Bearer "));
    assert_eq!(body["error"]["code"], -32001);
    assert_eq!(body["error"]["data"]["required_headers"], json!([TOKEN_HEADER, HOST_HEADER]));
    assert_eq!(body["error"]["data"]["missing_headers"], json!([TOKEN_HEADER, HOST_HEADER]));

    let event = audit.last();
    assert_eq!(event.outcome, McpOutcome::Rejected);
    assert_eq!(event.method, McpMethod::Invalid);
    assert_eq!(event.error_code, Some(-32001));
}

#[tokio::test]
async fn partial_credentials_name_the_missing_header() {
    let state = state(Arc::default());
    let headers = credentials(Some("tok"), None);
    let (status, body, _) = send(&state, &headers, &rpc("tools/list", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["data"]["missing_headers"], json!([HOST_HEADER]));
}

#[tokio::test]
async fn bearer_authorization_supplies_the_token() {
    let state = state(Arc::default());
    let mut headers = credentials(None, Some("http://connect.local"));
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
    let (status, body, _) = send(&state, &headers, &rpc("tools/list", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 15);
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

#[tokio::test]
async fn initialize_and_ping_succeed() {
    let state = state(Arc::default());
    let headers = credentials(Some("tok"), Some("http://connect.local"));
    let init = rpc("initialize", json!({"protocolVersion": "2025-06-18"}));
    let (status, body, _) = send(&state, &headers, &init).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["serverInfo"]["name"], "vault-gateway");
    assert!(body["result"]["capabilities"]["tools"].is_object());

    let (_, pong, _) = send(&state, &headers, &rpc("ping", Value::Null)).await;
    assert_eq!(pong["result"], json!({}));
    assert_eq!(pong["id"], 1);
}

#[tokio::test]
async fn notifications_are_accepted_without_body() {
    let state = state(Arc::default());
    let headers = credentials(Some("tok"), Some("http://connect.local"));
    let (status, body, _) = send(
        &state,
        &headers,
        &json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn protocol_errors_use_jsonrpc_codes() {
    let state = state(Arc::default());
    let headers = credentials(Some("tok"), Some("http://connect.local"));

    let (status, body, _) = send_raw(&state, &headers, "{oops".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);

    let old_version = json!({"jsonrpc": "1.0", "id": 1, "method": "ping"});
    let (_, body, _) = send(&state, &headers, &old_version).await;
    assert_eq!(body["error"]["code"], -32600);

    let (_, body, _) = send(&state, &headers, &rpc("resources/list", json!({}))).await;
    assert_eq!(body["error"]["code"], -32601);

    let (_, body, _) = send(&state, &headers, &rpc("tools/call", json!({"arguments": {}}))).await;
    assert_eq!(body["error"]["code"], -32602);

    let unknown = rpc("tools/call", json!({"name": "drop_tables"}));
    let (_, body, _) = send(&state, &headers, &unknown).await;
    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"].as_str().unwrap().contains("drop_tables"));
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let audit = Arc::new(RecordingAuditSink::default());
    let state = state(Arc::clone(&audit));
    let headers = credentials(Some("tok"), Some("http://connect.local"));
    let (status, body, _) = send_raw(&state, &headers, "x".repeat(5000)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], -32070);
    assert_eq!(audit.last().outcome, McpOutcome::Rejected);
}

// ============================================================================
// SECTION: Tool Calls
// ============================================================================

#[tokio::test]
async fn backend_failures_are_tool_results_not_protocol_errors() {
    let audit = Arc::new(RecordingAuditSink::default());
    let state = state(Arc::clone(&audit));
    let headers = credentials(Some("tok"), Some(&closed_port_url()));
    let call = rpc("tools/call", json!({"name": "get_health"}));
    let (status, body, _) = send(&state, &headers, &call).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["isError"], true);
    assert_eq!(body["result"]["content"][0]["type"], "text");
    assert!(body["result"]["content"][0]["text"].as_str().unwrap().starts_with("Error: "));

    let event = audit.last();
    assert_eq!(event.outcome, McpOutcome::ToolError);
    assert_eq!(event.tool.map(|tool| tool.as_str()), Some("get_health"));
    assert_eq!(event.error_kind.as_deref(), Some("BACKEND_ERROR"));
    assert!(event.tenant.is_some());
    assert!(!format!("{event:?}").contains("\"tok\""));
}

#[tokio::test]
async fn test_connection_reports_unreachable_backend() {
    let state = state(Arc::default());
    let headers = credentials(Some("tok"), Some(&closed_port_url()));
    let (_, body, _) = send(
        &state,
        &headers,
        &rpc("tools/call", json!({"name": "test_connection", "arguments": {"responseFormat": "json"}})),
    )
    .await;
    assert!(body["result"].get("isError").is_none());
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    let status: Value = serde_json::from_str(text).unwrap();
    assert_eq!(status["connected"], false);
}

#[tokio::test]
async fn health_endpoint_needs_no_credentials() {
    let response = handle_health().await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({"status": "ok"}));
}
