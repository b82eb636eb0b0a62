// crates/vault-gateway-mcp/tests/common/mod.rs
// ============================================================================
// Module: Gateway Test Helpers
// Description: Scripted backend and running gateway for end-to-end tests.
// Purpose: Exercise the HTTP surface against a recorded backend.
// Dependencies: tiny_http, tokio, vault-gateway-mcp
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Shared test helpers are not used by every test binary."
)]

use std::io::Read;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::thread::JoinHandle;

use serde_json::Value;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use tokio::net::TcpListener;
use vault_gateway_config::GatewayConfig;
use vault_gateway_mcp::McpNoopAuditSink;
use vault_gateway_mcp::McpServer;

/// Request observed by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Path and query.
    pub url: String,
    /// Authorization header value.
    pub authorization: Option<String>,
    /// Content-Type header value.
    pub content_type: Option<String>,
    /// Request body.
    pub body: String,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

/// Canned response.
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Body text.
    pub body: String,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
}

impl MockResponse {
    /// JSON response.
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            body: value.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Plain response.
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Running mock backend.
pub struct MockBackend {
    /// Base URL (`http://127.0.0.1:port`).
    pub url: String,
    /// Recorded requests.
    requests: mpsc::Receiver<RecordedRequest>,
    /// Server thread.
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Waits for the script to finish and returns the recorded requests.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("mock backend thread");
        self.requests.try_iter().collect()
    }
}

/// Serves `responses` in order, one per incoming request.
pub fn spawn_backend(responses: Vec<MockResponse>) -> MockBackend {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        for canned in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let header = |name: &str| {
                request
                    .headers()
                    .iter()
                    .find(|header| header.field.as_str().as_str().eq_ignore_ascii_case(name))
                    .map(|header| header.value.as_str().to_string())
            };
            let authorization = header("Authorization");
            let content_type = header("Content-Type");
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let _ = tx.send(RecordedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
                content_type,
                body,
            });
            let mut response = Response::from_string(canned.body).with_status_code(canned.status);
            for (name, value) in canned.headers {
                let header = Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap();
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
    });
    MockBackend {
        url: format!("http://{addr}"),
        requests: rx,
        handle,
    }
}

/// Starts a gateway on an ephemeral port and returns its base URL.
pub async fn spawn_gateway(config: GatewayConfig) -> String {
    let server =
        McpServer::with_audit_sink(config, Arc::new(McpNoopAuditSink)).expect("gateway builds");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve_with_listener(listener));
    format!("http://{addr}")
}
