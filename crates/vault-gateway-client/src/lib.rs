// crates/vault-gateway-client/src/lib.rs
// ============================================================================
// Module: Vault Gateway Client Library
// Description: Backend client adapter for the secrets REST API.
// Purpose: Translate typed operations into authenticated HTTP calls.
// Dependencies: crate::{backend, client, response, transport}
// ============================================================================

//! ## Overview
//! The client crate turns each backend operation into one HTTP request
//! carrying a tenant's bearer token, and maps every non-success response onto
//! [`vault_gateway_core::BackendError`]. Clients are cheap: build one per
//! inbound call from that call's credentials.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod backend;
pub mod client;
pub mod response;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use backend::VaultBackend;
pub use client::ConnectClient;
pub use client::DEFAULT_BACKEND_HOST;
pub use response::error_for_status;
pub use transport::TransportError;
pub use transport::build_http_client;
