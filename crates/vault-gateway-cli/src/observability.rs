// crates/vault-gateway-cli/src/observability.rs
// ============================================================================
// Module: Observability
// Description: Process-wide tracing subscriber setup.
// Purpose: Route gateway logs to stderr as compact text or JSON lines.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Installs one tracing subscriber per process. `RUST_LOG` controls the
//! filter (default `info`); `VAULT_GATEWAY_LOG_FORMAT=json` switches the
//! output to JSON lines. Logs always go to stderr so stdout stays free for
//! command output.

use std::io::Write;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "VAULT_GATEWAY_LOG_FORMAT";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines.
    Compact,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Resolves the format from a raw environment value.
    #[must_use]
    pub fn from_env_value(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Initializes the tracing subscriber once for the process.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let format = LogFormat::from_env_value(std::env::var(LOG_FORMAT_ENV).ok().as_deref());

        let result = match format {
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
        };

        if let Err(err) = result {
            let _ = writeln!(std::io::stderr(), "tracing init skipped: {err}");
        }
    });
}
