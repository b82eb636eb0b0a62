// crates/vault-gateway-client/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: Shared outbound HTTP connection pool.
// Purpose: Build the tenant-agnostic reqwest client used by every adapter.
// Dependencies: reqwest, vault-gateway-config
// ============================================================================

//! ## Overview
//! The transport owns connection pooling, timeouts and the User-Agent. It
//! holds no credentials; every request attaches its tenant's token itself.
//! Redirects are not followed so a bearer token is never replayed elsewhere.

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use thiserror::Error;
use vault_gateway_config::BackendConfig;

/// Failure to construct the HTTP transport.
#[derive(Debug, Error)]
#[error("http client build failed: {0}")]
pub struct TransportError(String);

/// Builds the shared HTTP client from backend settings.
///
/// # Errors
///
/// Returns [`TransportError`] when the TLS stack or client cannot initialize.
pub fn build_http_client(config: &BackendConfig) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .user_agent(config.user_agent.clone())
        .redirect(Policy::none())
        .build()
        .map_err(|err| TransportError(err.to_string()))
}
