// crates/vault-gateway-core/src/errors.rs
// ============================================================================
// Module: Backend Error Taxonomy
// Description: Typed failures for secrets-backend calls.
// Purpose: Give every backend failure a stable code, status, and retry hint.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every failure raised while talking to the secrets backend maps onto
//! [`BackendError`]. Each variant carries a stable machine code, an optional
//! HTTP status, and a retryability flag that callers surface to agents. The
//! gateway itself never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Code for rejected or missing bearer tokens.
pub const CODE_AUTHENTICATION: &str = "AUTHENTICATION_ERROR";
/// Code for authenticated callers lacking permission.
pub const CODE_AUTHORIZATION: &str = "AUTHORIZATION_ERROR";
/// Code for missing backend resources.
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
/// Code for backend throttling.
pub const CODE_RATE_LIMITED: &str = "RATE_LIMIT_EXCEEDED";
/// Code for argument validation failures.
pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
/// Default code for generic backend failures.
pub const CODE_BACKEND: &str = "BACKEND_ERROR";
/// Code for successful responses whose body could not be decoded.
pub const CODE_INVALID_RESPONSE: &str = "INVALID_RESPONSE";

/// Default retry delay when the backend omits `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Lowercase fragments that mark a transport failure as transient.
const TRANSIENT_MARKERS: &[&str] =
    &["network", "timeout", "timed out", "connection", "econnreset", "econnrefused", "dns"];

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Failure raised by a secrets-backend call.
///
/// # Invariants
/// - `code()` is stable per variant and safe to expose to clients.
/// - No variant carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Bearer token missing, invalid, or expired (HTTP 401).
    #[error("{message}")]
    Authentication {
        /// Human-readable failure message.
        message: String,
    },
    /// Token is valid but lacks permission for the resource (HTTP 403).
    #[error("{message}")]
    Authorization {
        /// Human-readable failure message.
        message: String,
    },
    /// Requested resource does not exist (HTTP 404).
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind label (vault, item, file, ...).
        kind: String,
        /// Requested identifier or path.
        id: String,
    },
    /// Backend throttled the request (HTTP 429).
    #[error("rate limit exceeded; retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds the caller should wait before retrying.
        retry_after_secs: u64,
    },
    /// Arguments failed validation before dispatch.
    #[error("{message}")]
    Validation {
        /// Human-readable failure message.
        message: String,
        /// Field name to validation messages.
        fields: BTreeMap<String, Vec<String>>,
    },
    /// Generic backend failure with an HTTP status.
    #[error("{message}")]
    Api {
        /// Human-readable failure message.
        message: String,
        /// HTTP status when the backend answered.
        status: Option<u16>,
        /// Machine-readable code.
        code: String,
        /// Whether the caller may retry.
        retryable: bool,
    },
    /// Transport failure before a response was received.
    #[error("{message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
}

impl BackendError {
    /// Builds a generic API failure with the default code.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(status),
            code: CODE_BACKEND.to_string(),
            retryable: false,
        }
    }

    /// Builds a not-found failure for the given entity kind and identifier.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Builds a validation failure from a field map.
    #[must_use]
    pub fn validation(
        message: impl Into<String>,
        fields: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Returns the human-readable failure message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Authentication {
                ..
            } => CODE_AUTHENTICATION,
            Self::Authorization {
                ..
            } => CODE_AUTHORIZATION,
            Self::NotFound {
                ..
            } => CODE_NOT_FOUND,
            Self::RateLimited {
                ..
            } => CODE_RATE_LIMITED,
            Self::Validation {
                ..
            } => CODE_VALIDATION,
            Self::Api {
                code, ..
            } => code,
            Self::Transport {
                ..
            } => CODE_BACKEND,
        }
    }

    /// Returns the HTTP status associated with the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication {
                ..
            } => Some(401),
            Self::Authorization {
                ..
            } => Some(403),
            Self::NotFound {
                ..
            } => Some(404),
            Self::RateLimited {
                ..
            } => Some(429),
            Self::Validation {
                ..
            } => Some(400),
            Self::Api {
                status, ..
            } => *status,
            Self::Transport {
                ..
            } => None,
        }
    }

    /// Returns the declared retryable flag of the variant.
    #[must_use]
    pub const fn retryable(&self) -> bool {
        match self {
            Self::RateLimited {
                ..
            } => true,
            Self::Api {
                retryable, ..
            } => *retryable,
            _ => false,
        }
    }

    /// Determines whether the failure is worth retrying.
    ///
    /// Typed failures answer with their declared flag. Transport failures are
    /// retryable when their message looks like a network or timeout fault.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport {
                message,
            } => {
                let lowered = message.to_ascii_lowercase();
                TRANSIENT_MARKERS.iter().any(|marker| lowered.contains(marker))
            }
            other => other.retryable(),
        }
    }

    /// Returns the structured detail record rendered alongside the message.
    #[must_use]
    pub fn details(&self) -> ErrorDetails {
        let mut details = ErrorDetails {
            code: self.code().to_string(),
            status: self.status(),
            retryable: self.is_retryable(),
            retry_after: None,
            resource: None,
            id: None,
            fields: None,
        };
        match self {
            Self::RateLimited {
                retry_after_secs,
            } => details.retry_after = Some(*retry_after_secs),
            Self::NotFound {
                kind,
                id,
            } => {
                details.resource = Some(kind.clone());
                details.id = Some(id.clone());
            }
            Self::Validation {
                fields, ..
            } if !fields.is_empty() => details.fields = Some(fields.clone()),
            _ => {}
        }
        details
    }
}

// ============================================================================
// SECTION: Details
// ============================================================================

/// Structured detail object rendered with error blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Stable failure code.
    pub code: String,
    /// HTTP status when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Whether the caller may retry.
    pub retryable: bool,
    /// Suggested retry delay in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// Missing resource kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Missing resource identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
