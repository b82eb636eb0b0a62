// crates/vault-gateway-cli/src/main.rs
// ============================================================================
// Module: Vault Gateway CLI Entry Point
// Description: Command dispatcher for the Vault Gateway server and tooling.
// Purpose: Run the MCP gateway and offer small operator utilities.
// Dependencies: clap, tokio, vault-gateway-client, vault-gateway-config, vault-gateway-mcp
// ============================================================================

//! ## Overview
//! `vault-gateway serve` runs the HTTP MCP gateway. The remaining commands
//! are operator helpers: print the tool catalog, print the effective config,
//! and probe a backend with a token before wiring it into an agent.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use vault_gateway_cli::init_tracing;
use vault_gateway_client::ConnectClient;
use vault_gateway_client::VaultBackend;
use vault_gateway_client::build_http_client;
use vault_gateway_config::GatewayConfig;
use vault_gateway_contract::tool_contracts;
use vault_gateway_contract::tool_definitions;
use vault_gateway_core::TenantCredentials;
use vault_gateway_mcp::McpServer;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "vault-gateway", version, disable_help_subcommand = true)]
struct Cli {
    /// Command to run.
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP gateway over HTTP.
    Serve(ServeCommand),
    /// Print the MCP tool catalog as JSON.
    Tools(ToolsCommand),
    /// Probe a backend with the given credentials.
    Check(CheckCommand),
    /// Print the effective configuration as JSON.
    Config(ConfigCommand),
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the listener address.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Arguments for `tools`.
#[derive(Args, Debug)]
struct ToolsCommand {
    /// Include per-tool usage notes.
    #[arg(long)]
    notes: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Backend base URL.
    #[arg(long, value_name = "URL")]
    host: String,
    /// Bearer token for the backend.
    #[arg(long, env = "VAULT_GATEWAY_TOKEN", hide_env_values = true)]
    token: String,
    /// Path to a TOML config file for transport settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `config`.
#[derive(Args, Debug)]
struct ConfigCommand {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure carrying a user-facing message.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(String),
    /// The gateway failed to start or stopped with an error.
    #[error("server error: {0}")]
    Server(String),
    /// Writing command output failed.
    #[error("failed to write {stream}: {source}")]
    Output {
        /// Stream name.
        stream: &'static str,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Serializing command output failed.
    #[error("failed to encode output: {0}")]
    Encode(String),
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the parsed command.
async fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools(command) => command_tools(&command),
        Commands::Check(command) => command_check(command).await,
        Commands::Config(command) => command_config(&command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `serve`.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config, command.bind)?;
    let server = McpServer::from_config(config).map_err(|err| CliError::Server(err.to_string()))?;
    server.serve().await.map_err(|err| CliError::Server(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `tools`.
fn command_tools(command: &ToolsCommand) -> CliResult<ExitCode> {
    write_json(&tool_catalog(command.notes)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the tool catalog, as full contracts when `with_notes` is set.
fn tool_catalog(with_notes: bool) -> CliResult<serde_json::Value> {
    let catalog = if with_notes {
        serde_json::to_value(tool_contracts())
    } else {
        serde_json::to_value(tool_definitions())
    };
    catalog.map_err(|err| CliError::Encode(err.to_string()))
}

/// Executes `check`. Exits non-zero when the backend is unreachable.
async fn command_check(command: CheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config, None)?;
    let http = build_http_client(&config.backend).map_err(|err| CliError::Config(err.to_string()))?;
    let credentials = TenantCredentials::new(Some(command.token), Some(command.host));
    credentials.validate().map_err(|err| CliError::Config(err.to_string()))?;
    let client = ConnectClient::new(http, &credentials);

    let status = client.test_connection().await;
    tracing::info!(host = client.host(), connected = status.connected, "connection probe finished");
    write_json(&status)?;
    Ok(if status.connected { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes `config`.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.clone(), None)?;
    write_json(&config)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration and applies a command-line bind override.
fn load_config(path: Option<PathBuf>, bind: Option<String>) -> CliResult<GatewayConfig> {
    let mut config =
        GatewayConfig::load(path.as_deref()).map_err(|err| CliError::Config(err.to_string()))?;
    if let Some(bind) = bind {
        config.server.bind = bind;
        config.validate().map_err(|err| CliError::Config(err.to_string()))?;
    }
    Ok(config)
}

/// Writes a value to stdout as pretty JSON.
fn write_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Encode(err.to_string()))?;
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{rendered}").map_err(|source| CliError::Output {
        stream: "stdout",
        source,
    })
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "vault-gateway: {message}");
    ExitCode::FAILURE
}
