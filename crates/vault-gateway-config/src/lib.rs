// crates/vault-gateway-config/src/lib.rs
// ============================================================================
// Module: Vault Gateway Config Library
// Description: Configuration model and loading for the gateway.
// Purpose: Provide one validated, credential-free configuration surface.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Gateway configuration is a small TOML document plus a handful of
//! environment knobs. It never carries tenant credentials; those arrive with
//! each request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::BackendConfig;
pub use config::ConfigError;
pub use config::GatewayConfig;
pub use config::ResponseLimits;
pub use config::ServerConfig;
