// crates/vault-gateway-client/src/response.rs
// ============================================================================
// Module: Response Mapping
// Description: Status-code classification and body decoding.
// Purpose: Turn raw backend responses into typed values or typed failures.
// Dependencies: serde, serde_json, vault-gateway-core
// ============================================================================

//! ## Overview
//! Status mapping is a pure function of the status code, the `Retry-After`
//! header and the body, so it is testable without a network.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;
use vault_gateway_core::BackendError;
use vault_gateway_core::errors::CODE_INVALID_RESPONSE;
use vault_gateway_core::errors::DEFAULT_RETRY_AFTER_SECS;

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

/// Maps a non-success response onto the error taxonomy.
///
/// `kind` and `id` name the requested entity for not-found failures.
#[must_use]
pub fn error_for_status(
    status: u16,
    retry_after: Option<&str>,
    body: &[u8],
    kind: &str,
    id: &str,
) -> BackendError {
    match status {
        429 => BackendError::RateLimited {
            retry_after_secs: parse_retry_after(retry_after),
        },
        401 => BackendError::Authentication {
            message: body_message(body)
                .unwrap_or_else(|| "authentication failed: invalid or expired token".to_string()),
        },
        403 => BackendError::Authorization {
            message: body_message(body)
                .unwrap_or_else(|| format!("access denied to {kind} {id}")),
        },
        404 => BackendError::not_found(kind, id),
        _ => BackendError::api(
            status,
            body_message(body).unwrap_or_else(|| format!("API error: {status}")),
        ),
    }
}

/// Parses `Retry-After` seconds, defaulting when absent or malformed.
fn parse_retry_after(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok()).unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Extracts `message`, then `error`, from a JSON error body.
fn body_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a JSON body. An empty body decodes as JSON `null`.
///
/// # Errors
///
/// Returns an `INVALID_RESPONSE` failure when the body does not match `T`.
pub fn decode_json<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, BackendError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { body };
    serde_json::from_slice(body).map_err(|err| BackendError::Api {
        message: format!("invalid backend response: {err}"),
        status: Some(status),
        code: CODE_INVALID_RESPONSE.to_string(),
        retryable: false,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
