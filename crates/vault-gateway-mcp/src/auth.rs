// crates/vault-gateway-mcp/src/auth.rs
// ============================================================================
// Module: Tenant Credential Resolution
// Description: Per-request backend credentials taken from HTTP headers.
// Purpose: Build a request context carrying the caller's token and host.
// Dependencies: axum, vault-gateway-core
// ============================================================================

//! ## Overview
//! Every MCP request names its own backend: the token arrives in
//! `x-connect-token` (or a standard `Authorization: Bearer` header) and the
//! backend base URL in `x-connect-host`. Credentials live only in the request
//! context; nothing here is shared between requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use vault_gateway_core::CredentialField;
use vault_gateway_core::MissingCredentials;
use vault_gateway_core::TenantCredentials;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the backend bearer token.
pub const TOKEN_HEADER: &str = "x-connect-token";
/// Header carrying the backend base URL.
pub const HOST_HEADER: &str = "x-connect-host";
/// Headers every MCP request must supply.
pub const REQUIRED_HEADERS: [&str; 2] = [TOKEN_HEADER, HOST_HEADER];
/// Challenge returned with 401 responses.
pub const WWW_AUTHENTICATE_CHALLENGE: &str = "Bearer realm=\"vault-gateway\"";

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-request metadata for routing and audit.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Peer IP address when available.
    pub peer_ip: Option<IpAddr>,
    /// JSON-RPC request identifier for auditing.
    pub request_id: Option<String>,
    /// Backend credentials supplied by the caller.
    pub credentials: TenantCredentials,
}

impl RequestContext {
    /// Builds a context from inbound HTTP headers.
    #[must_use]
    pub fn from_headers(peer_ip: Option<IpAddr>, headers: &HeaderMap) -> Self {
        Self {
            peer_ip,
            request_id: None,
            credentials: resolve_credentials(headers),
        }
    }

    /// Attaches a request identifier.
    #[must_use]
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Returns the token fingerprint used to label the tenant in logs.
    #[must_use]
    pub fn tenant(&self) -> Option<String> {
        self.credentials.fingerprint()
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Reads tenant credentials from request headers.
///
/// `x-connect-token` wins over `Authorization: Bearer`; blank values count
/// as absent.
#[must_use]
pub fn resolve_credentials(headers: &HeaderMap) -> TenantCredentials {
    let token = header_value(headers, TOKEN_HEADER).or_else(|| bearer_token(headers));
    let host = header_value(headers, HOST_HEADER);
    TenantCredentials::new(token, host)
}

/// Maps missing credential fields to the header names that supply them.
#[must_use]
pub fn missing_headers(missing: &MissingCredentials) -> Vec<&'static str> {
    missing.missing.iter().map(|field| header_for(*field)).collect()
}

/// Returns the header that carries a credential field.
#[must_use]
pub const fn header_for(field: CredentialField) -> &'static str {
    match field {
        CredentialField::AuthToken => TOKEN_HEADER,
        CredentialField::BackendHost => HOST_HEADER,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = raw.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
