// crates/vault-gateway-client/tests/connect_client.rs
// ============================================================================
// Module: Connect Client Tests
// Description: Adapter behavior against a scripted HTTP backend.
// Purpose: Verify routes, headers, payload injection, and status mapping.
// Dependencies: vault-gateway-client, tiny_http, tokio
// ============================================================================

//! ## Overview
//! Each test scripts a local backend, drives one adapter operation and then
//! inspects both the typed result and the request the backend observed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use reqwest::Client;
use serde_json::json;
use vault_gateway_client::ConnectClient;
use vault_gateway_client::VaultBackend;
use vault_gateway_core::BackendError;
use vault_gateway_core::Item;
use vault_gateway_core::ItemCategory;
use vault_gateway_core::PatchOp;
use vault_gateway_core::PatchOperation;
use vault_gateway_core::TenantCredentials;
use vault_gateway_core::VaultRef;

use crate::common::MockResponse;
use crate::common::closed_port_url;
use crate::common::spawn_backend;

fn client_for(url: &str) -> ConnectClient {
    let creds = TenantCredentials::new(Some("tenant-token".into()), Some(format!("{url}/")));
    ConnectClient::new(Client::new(), &creds)
}

fn sample_item(vault: &str) -> Item {
    serde_json::from_value(json!({
        "title": "Deploy key",
        "category": "API_CREDENTIAL",
        "vault": {"id": vault},
        "fields": [{"label": "credential", "type": "CONCEALED", "value": "abc"}]
    }))
    .unwrap()
}

// ============================================================================
// SECTION: Reads
// ============================================================================

#[tokio::test]
async fn list_vaults_sends_bearer_token_and_filter() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!([{"id": "v1", "name": "Prod", "items": 3}, {"id": "v2", "name": "Dev"}]),
    )]);
    let client = client_for(&backend.url);
    let vaults = client.list_vaults(Some("name eq \"Prod\"")).await.unwrap();
    let requests = backend.finish();

    assert_eq!(vaults.len(), 2);
    assert_eq!(vaults[0].item_count, Some(3));
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/v1/vaults?filter=name+eq+%22Prod%22");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tenant-token"));
}

#[tokio::test]
async fn get_item_not_found_names_the_item() {
    let backend = spawn_backend(vec![MockResponse::json(
        404,
        &json!({"status": 404, "message": "item not found"}),
    )]);
    let client = client_for(&backend.url);
    let err = client.get_item("v1", "i9").await.unwrap_err();
    let requests = backend.finish();

    assert_eq!(err, BackendError::not_found("item", "i9"));
    assert_eq!(requests[0].url, "/v1/vaults/v1/items/i9");
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let backend = spawn_backend(vec![
        MockResponse::json(429, &json!({"message": "slow down"})).with_header("Retry-After", "5"),
        MockResponse::text(429, ""),
    ]);
    let client = client_for(&backend.url);
    let first = client.get_vault("v1").await.unwrap_err();
    let second = client.get_vault("v1").await.unwrap_err();
    backend.finish();

    assert_eq!(first, BackendError::RateLimited {
        retry_after_secs: 5
    });
    assert_eq!(second, BackendError::RateLimited {
        retry_after_secs: 60
    });
    assert!(first.is_retryable());
}

#[tokio::test]
async fn authentication_and_authorization_failures_are_typed() {
    let backend = spawn_backend(vec![
        MockResponse::json(401, &json!({"status": 401, "message": "Invalid token"})),
        MockResponse::text(403, "forbidden"),
    ]);
    let client = client_for(&backend.url);
    let auth = client.list_vaults(None).await.unwrap_err();
    let authz = client.list_items("v1", None).await.unwrap_err();
    backend.finish();

    assert_eq!(auth.code(), "AUTHENTICATION_ERROR");
    assert_eq!(auth.message(), "Invalid token");
    assert_eq!(authz.code(), "AUTHORIZATION_ERROR");
}

#[tokio::test]
async fn server_errors_fall_back_to_status_message() {
    let backend = spawn_backend(vec![MockResponse::text(500, "<html>boom</html>")]);
    let client = client_for(&backend.url);
    let err = client.get_health().await.unwrap_err();
    backend.finish();

    assert_eq!(err.message(), "API error: 500");
    assert_eq!(err.code(), "BACKEND_ERROR");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn list_files_requests_inline_content() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!([{"id": "f1", "name": "cert.pem", "size": 2048, "content": "aGVsbG8="}]),
    )]);
    let client = client_for(&backend.url);
    let files = client.list_files("v1", "i1", true).await.unwrap();
    let requests = backend.finish();

    assert_eq!(files[0].content.as_deref(), Some("aGVsbG8="));
    assert_eq!(requests[0].url, "/v1/vaults/v1/items/i1/files?inline_files=true");
}

#[tokio::test]
async fn file_content_returns_raw_bytes() {
    let backend = spawn_backend(vec![MockResponse::text(200, "-----BEGIN CERT-----")]);
    let client = client_for(&backend.url);
    let bytes = client.get_file_content("v1", "i1", "f1").await.unwrap();
    let requests = backend.finish();

    assert_eq!(&bytes[..], b"-----BEGIN CERT-----");
    assert_eq!(requests[0].url, "/v1/vaults/v1/items/i1/files/f1/content");
}

#[tokio::test]
async fn activity_forwards_paging_and_never_reports_more() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!([
            {"requestId": "r1", "action": "READ", "result": "SUCCESS"},
            {"requestId": "r2", "action": "UPDATE", "result": "DENY"}
        ]),
    )]);
    let client = client_for(&backend.url);
    let page = client.list_activity(Some(2), Some(10)).await.unwrap();
    let requests = backend.finish();

    assert_eq!(requests[0].url, "/v1/activity?limit=2&offset=10");
    assert_eq!(page.count, 2);
    assert_eq!(page.count, page.items.len());
    assert!(!page.has_more);
    assert_eq!(page.next_offset, None);
}

#[tokio::test]
async fn probes_use_host_root() {
    let backend = spawn_backend(vec![
        MockResponse::json(
            200,
            &json!({"name": "Connect API", "version": "1.7.3", "dependencies": [
                {"service": "sqlite", "status": "ACTIVE", "message": "Connected"}
            ]}),
        ),
        MockResponse::text(200, ".\n"),
    ]);
    let client = client_for(&backend.url);
    let health = client.get_health().await.unwrap();
    let beat = client.heartbeat().await.unwrap();
    let requests = backend.finish();

    assert_eq!(health.dependencies.len(), 1);
    assert_eq!(beat, ".");
    assert_eq!(requests[0].url, "/health");
    assert_eq!(requests[1].url, "/heartbeat");
}

// ============================================================================
// SECTION: Writes
// ============================================================================

#[tokio::test]
async fn create_item_forces_the_target_vault() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!({"id": "new", "title": "Deploy key", "category": "API_CREDENTIAL", "vault": {"id": "v1"}}),
    )]);
    let client = client_for(&backend.url);
    let created = client.create_item("v1", sample_item("somewhere-else")).await.unwrap();
    let requests = backend.finish();

    assert_eq!(created.id.as_deref(), Some("new"));
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/v1/vaults/v1/items");
    let body = requests[0].json();
    assert_eq!(body["vault"], json!({"id": "v1"}));
    assert_eq!(body["category"], "API_CREDENTIAL");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn update_item_injects_id_and_vault() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!({"id": "i1", "title": "Deploy key", "category": "API_CREDENTIAL", "vault": {"id": "v1"}, "version": 2}),
    )]);
    let client = client_for(&backend.url);
    let mut item = sample_item("x");
    item.vault = VaultRef::id("x");
    let updated = client.update_item("v1", "i1", item).await.unwrap();
    let requests = backend.finish();

    assert_eq!(updated.version, Some(2));
    assert_eq!(requests[0].method, "PUT");
    let body = requests[0].json();
    assert_eq!(body["id"], "i1");
    assert_eq!(body["vault"]["id"], "v1");
}

#[tokio::test]
async fn patch_item_sends_operations_verbatim() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!({"id": "i1", "title": "Renamed", "category": "LOGIN", "vault": {"id": "v1"}}),
    )]);
    let client = client_for(&backend.url);
    let ops = vec![
        PatchOperation {
            op: PatchOp::Replace,
            path: "/title".to_string(),
            value: Some(json!("Renamed")),
            from: None,
        },
        PatchOperation {
            op: PatchOp::Remove,
            path: "/fields/username".to_string(),
            value: None,
            from: None,
        },
    ];
    let patched = client.patch_item("v1", "i1", &ops).await.unwrap();
    let requests = backend.finish();

    assert_eq!(patched.title, "Renamed");
    assert_eq!(patched.category, ItemCategory::Login);
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json-patch+json"));
    assert_eq!(
        requests[0].json(),
        json!([
            {"op": "replace", "path": "/title", "value": "Renamed"},
            {"op": "remove", "path": "/fields/username"}
        ])
    );
}

#[tokio::test]
async fn patch_item_keeps_explicit_null_values() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!({"id": "i1", "title": "Router", "category": "LOGIN", "vault": {"id": "v1"}}),
    )]);
    let client = client_for(&backend.url);
    let raw = json!([
        {"op": "replace", "path": "/fields/0/value", "value": null},
        {"op": "test", "path": "/favorite", "value": null}
    ]);
    let ops: Vec<PatchOperation> = serde_json::from_value(raw.clone()).unwrap();
    client.patch_item("v1", "i1", &ops).await.unwrap();
    let requests = backend.finish();

    assert_eq!(requests[0].json(), raw);
}

#[tokio::test]
async fn get_item_tolerates_unrecognized_backend_labels() {
    let payload = json!({
        "id": "i1",
        "title": "Legacy",
        "category": "CRYPTO_WALLET",
        "vault": {"id": "v1"},
        "state": "PENDING",
        "fields": [{"id": "f1", "type": "UNKNOWN", "value": "x"}],
        "overview": {"subtitle": "wallet"}
    });
    let backend = spawn_backend(vec![MockResponse::json(200, &payload)]);
    let client = client_for(&backend.url);
    let item = client.get_item("v1", "i1").await.unwrap();
    backend.finish();

    assert_eq!(item.category, ItemCategory::Other("CRYPTO_WALLET".to_string()));
    assert_eq!(serde_json::to_value(&item).unwrap(), payload);
}

#[tokio::test]
async fn delete_item_accepts_no_content() {
    let backend = spawn_backend(vec![MockResponse::text(204, "")]);
    let client = client_for(&backend.url);
    client.delete_item("v1", "i1").await.unwrap();
    let requests = backend.finish();

    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].url, "/v1/vaults/v1/items/i1");
}

// ============================================================================
// SECTION: Connectivity
// ============================================================================

#[tokio::test]
async fn test_connection_reports_success() {
    let backend = spawn_backend(vec![MockResponse::json(
        200,
        &json!({"name": "Connect API", "version": "1.7.3", "dependencies": []}),
    )]);
    let status = client_for(&backend.url).test_connection().await;
    backend.finish();

    assert!(status.connected);
    assert_eq!(status.message, "connected to Connect API 1.7.3");
    assert_eq!(status.version.as_deref(), Some("1.7.3"));
}

#[tokio::test]
async fn test_connection_never_fails_on_unreachable_backend() {
    let status = client_for(&closed_port_url()).test_connection().await;
    assert!(!status.connected);
    assert!(!status.message.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_retryable_transport_error() {
    let err = client_for(&closed_port_url()).list_vaults(None).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport { .. }), "unexpected error: {err:?}");
    assert!(err.is_retryable());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn missing_token_fails_before_network() {
    let creds = TenantCredentials::new(None, Some(closed_port_url()));
    let client = ConnectClient::new(Client::new(), &creds);
    let err = client.get_vault("v1").await.unwrap_err();
    assert_eq!(err.code(), "AUTHENTICATION_ERROR");
}
