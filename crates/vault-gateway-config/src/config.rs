// crates/vault-gateway-config/src/config.rs
// ============================================================================
// Module: Gateway Configuration
// Description: Configuration loading and validation for Vault Gateway.
// Purpose: Provide strict, fail-closed config parsing with defensive env knobs.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! This module loads gateway configuration from TOML and applies environment
//! overrides. File values fail closed: anything malformed or out of range is
//! rejected. Response-limit environment knobs are parsed defensively instead:
//! a non-numeric or zero value is ignored and the configured default stays.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VAULT_GATEWAY_CONFIG";
/// Environment variable overriding the bind address.
pub const BIND_ENV_VAR: &str = "VAULT_GATEWAY_BIND";
/// Environment variable overriding the response character limit.
pub const CHARACTER_LIMIT_ENV_VAR: &str = "VAULT_GATEWAY_CHARACTER_LIMIT";
/// Environment variable overriding the default page size.
pub const DEFAULT_PAGE_SIZE_ENV_VAR: &str = "VAULT_GATEWAY_DEFAULT_PAGE_SIZE";
/// Environment variable overriding the maximum page size.
pub const MAX_PAGE_SIZE_ENV_VAR: &str = "VAULT_GATEWAY_MAX_PAGE_SIZE";

/// Default response character limit.
pub const DEFAULT_CHARACTER_LIMIT: usize = 50_000;
/// Default page size for list tools.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Default upper bound on page size.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Default bind address for the HTTP listener.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
/// Default maximum inbound request body size.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Hard ceiling for the inbound request body size.
pub const MAX_BODY_BYTES_CEILING: usize = 16 * 1024 * 1024;
/// Default backend request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default backend connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
/// Lowest accepted timeout.
const MIN_TIMEOUT_MS: u64 = 100;
/// Highest accepted timeout.
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Maximum size of the config file.
const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound backend transport settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Response shaping limits.
    #[serde(default)]
    pub limits: ResponseLimits,
    /// Audit sink settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Outbound backend transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// User-Agent sent to the backend.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Response shaping limits.
///
/// # Invariants
/// - All values are non-zero.
/// - `default_page_size <= max_page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseLimits {
    /// Maximum rendered response length in characters.
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
    /// Page size used when a list call omits `limit`.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Largest accepted `limit`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for ResponseLimits {
    fn default() -> Self {
        Self {
            character_limit: DEFAULT_CHARACTER_LIMIT,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Audit disabled.
    None,
}

/// Audit sink settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl GatewayConfig {
    /// Loads configuration from disk and the process environment.
    ///
    /// The file comes from `path`, else `VAULT_GATEWAY_CONFIG`; with neither,
    /// built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path)? {
            Some(resolved) => Self::from_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, or invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides through the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV_VAR).map(|raw| raw.trim().to_string())
            && !bind.is_empty()
        {
            self.server.bind = bind;
        }
        self.limits.apply_env_overrides(&lookup);
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any section is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.backend.validate()?;
        self.limits.validate()?;
        self.audit.validate()
    }
}

impl ServerConfig {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid bind address: {}", self.bind)))
    }

    /// Validates listener settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_BODY_BYTES_CEILING {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be between 1 and {MAX_BODY_BYTES_CEILING}"
            )));
        }
        Ok(())
    }
}

impl BackendConfig {
    /// Validates backend transport settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("backend.timeout_ms", self.timeout_ms),
            ("backend.connect_timeout_ms", self.connect_timeout_ms),
        ];
        for (field, value) in timeouts {
            if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
                )));
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.user_agent must be non-empty".to_string()));
        }
        Ok(())
    }
}

impl ResponseLimits {
    /// Builds limits from defaults plus environment knobs.
    #[must_use]
    pub fn from_env_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut limits = Self::default();
        limits.apply_env_overrides(&lookup);
        limits
    }

    /// Applies environment knobs, ignoring non-numeric or zero values.
    ///
    /// A default page size larger than the maximum is clamped to the maximum.
    pub fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_knob(lookup(CHARACTER_LIMIT_ENV_VAR)) {
            self.character_limit = value;
        }
        if let Some(value) = parse_knob(lookup(DEFAULT_PAGE_SIZE_ENV_VAR)) {
            self.default_page_size = value;
        }
        if let Some(value) = parse_knob(lookup(MAX_PAGE_SIZE_ENV_VAR)) {
            self.max_page_size = value;
        }
        self.default_page_size = self.default_page_size.min(self.max_page_size);
    }

    /// Validates limit values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.character_limit == 0 || self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::Invalid("limits must be greater than zero".to_string()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(
                "limits.default_page_size exceeds limits.max_page_size".to_string(),
            ));
        }
        Ok(())
    }
}

impl AuditConfig {
    /// Validates audit sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) if path.as_os_str().is_empty() => {
                Err(ConfigError::Invalid("audit.path must be non-empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let candidate = match path {
        Some(path) => Some(path.to_path_buf()),
        None => env::var(CONFIG_ENV_VAR)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from),
    };
    if let Some(path) = &candidate
        && path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH
    {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    Ok(candidate)
}

/// Parses a positive integer knob, discarding anything else.
fn parse_knob(raw: Option<String>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|value| *value > 0)
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default request body cap.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default connect timeout.
const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

/// Default User-Agent.
fn default_user_agent() -> String {
    format!("vault-gateway/{}", env!("CARGO_PKG_VERSION"))
}

/// Default character limit.
const fn default_character_limit() -> usize {
    DEFAULT_CHARACTER_LIMIT
}

/// Default page size.
const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Default maximum page size.
const fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwraps.")]

    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn limits_default_without_env() {
        let limits = ResponseLimits::from_env_lookup(lookup(&[]));
        assert_eq!(limits.character_limit, 50_000);
        assert_eq!(limits.default_page_size, 20);
        assert_eq!(limits.max_page_size, 100);
    }

    #[test]
    fn non_numeric_knobs_fall_back_silently() {
        let limits = ResponseLimits::from_env_lookup(lookup(&[
            (CHARACTER_LIMIT_ENV_VAR, "lots"),
            (DEFAULT_PAGE_SIZE_ENV_VAR, "0"),
            (MAX_PAGE_SIZE_ENV_VAR, "-5"),
        ]));
        assert_eq!(limits, ResponseLimits::default());
    }

    #[test]
    fn numeric_knobs_override_and_clamp() {
        let limits = ResponseLimits::from_env_lookup(lookup(&[
            (CHARACTER_LIMIT_ENV_VAR, " 1200 "),
            (DEFAULT_PAGE_SIZE_ENV_VAR, "80"),
            (MAX_PAGE_SIZE_ENV_VAR, "50"),
        ]));
        assert_eq!(limits.character_limit, 1200);
        assert_eq!(limits.max_page_size, 50);
        assert_eq!(limits.default_page_size, 50);
    }

    #[test]
    fn bind_override_ignores_blank_values() {
        let mut config = GatewayConfig::default();
        config.apply_env_overrides(lookup(&[(BIND_ENV_VAR, "  ")]));
        assert_eq!(config.server.bind, DEFAULT_BIND);
        config.apply_env_overrides(lookup(&[(BIND_ENV_VAR, "0.0.0.0:9000")]));
        assert_eq!(config.server.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn parse_knob_rejects_garbage() {
        assert_eq!(parse_knob(None), None);
        assert_eq!(parse_knob(Some("12abc".into())), None);
        assert_eq!(parse_knob(Some("7".into())), Some(7));
    }
}
