// crates/vault-gateway-cli/src/lib.rs
// ============================================================================
// Module: Vault Gateway CLI Library
// Description: Shared helpers for the `vault-gateway` binary.
// Purpose: Keep process-wide setup testable outside the entry point.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Support code for the gateway command line. The binary owns argument
//! parsing and dispatch; this library owns logging setup.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod observability;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use observability::LOG_FORMAT_ENV;
pub use observability::LogFormat;
pub use observability::init_tracing;
