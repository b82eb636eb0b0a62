// crates/vault-gateway-core/src/credentials.rs
// ============================================================================
// Module: Tenant Credentials
// Description: Per-request backend credentials and their validation.
// Purpose: Carry one tenant's token and host without leaking the token.
// Dependencies: sha2, thiserror
// ============================================================================

//! ## Overview
//! [`TenantCredentials`] hold the bearer token and backend host supplied with
//! a single inbound call. They are built per request, handed to one backend
//! client, and dropped with it. The token never appears in `Debug` output;
//! logs use [`TenantCredentials::fingerprint`] instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of digest bytes kept in a token fingerprint.
const FINGERPRINT_BYTES: usize = 8;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Credential field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialField {
    /// Backend bearer token.
    AuthToken,
    /// Backend base URL.
    BackendHost,
}

impl CredentialField {
    /// Returns a stable label for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthToken => "auth_token",
            Self::BackendHost => "backend_host",
        }
    }
}

/// Credentials for one backend account, scoped to one inbound call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TenantCredentials {
    /// Bearer token presented to the backend.
    pub auth_token: Option<String>,
    /// Backend base URL.
    pub backend_host: Option<String>,
}

/// Raised when a request lacks one or both credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing tenant credentials: {}", field_list(.missing))]
pub struct MissingCredentials {
    /// Fields that were absent or blank.
    pub missing: Vec<CredentialField>,
}

// ============================================================================
// SECTION: Implementation
// ============================================================================

impl TenantCredentials {
    /// Builds credentials, treating blank values as absent.
    #[must_use]
    pub fn new(auth_token: Option<String>, backend_host: Option<String>) -> Self {
        Self {
            auth_token: non_blank(auth_token),
            backend_host: non_blank(backend_host),
        }
    }

    /// Confirms both credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] naming every absent field.
    pub fn validate(&self) -> Result<(), MissingCredentials> {
        let mut missing = Vec::new();
        if self.auth_token.as_deref().is_none_or(|token| token.trim().is_empty()) {
            missing.push(CredentialField::AuthToken);
        }
        if self.backend_host.as_deref().is_none_or(|host| host.trim().is_empty()) {
            missing.push(CredentialField::BackendHost);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingCredentials {
                missing,
            })
        }
    }

    /// Returns a short SHA-256 fingerprint of the token for logs.
    ///
    /// Returns `None` when no token is present.
    #[must_use]
    pub fn fingerprint(&self) -> Option<String> {
        let token = self.auth_token.as_deref()?;
        let digest = Sha256::digest(token.as_bytes());
        let mut out = String::with_capacity(FINGERPRINT_BYTES * 2);
        for byte in digest.iter().take(FINGERPRINT_BYTES) {
            let _ = write!(out, "{byte:02x}");
        }
        Some(out)
    }
}

impl fmt::Debug for TenantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredentials")
            .field("auth_token", &self.fingerprint().map(|print| format!("sha256:{print}")))
            .field("backend_host", &self.backend_host)
            .finish()
    }
}

/// Drops blank strings and trims the rest.
fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|raw| raw.trim().to_string()).filter(|trimmed| !trimmed.is_empty())
}

/// Formats missing field labels for error messages.
fn field_list(fields: &[CredentialField]) -> String {
    fields.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
