//! Kansas Claims Client - Command Line Binary
//!
//! # Usage
//!
//! ```bash
//! # Against a local service on the default port
//! claims-cli reference
//!
//! # Against another host
//! CLAIMS_BASE_URL=https://claims.example.com claims-cli summary --county Sedgwick
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_BASE_URL` - Service base URL (default: http://localhost:3001)
//! * `CLAIMS_TIMEOUT_SECS` - Request timeout in seconds (default: none)
//! * `CLAIMS_USER_AGENT` - User agent override
//! * `CLAIMS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CLAIMS_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use claims_store::ClaimsClientStore;
use infra_http::HttpClaimsApi;
use interface_cli::telemetry::init_tracing;
use interface_cli::{execute, Cli, CliConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, wires the store, and runs the requested command.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the HTTP adapter
/// cannot be built. Command failures are reported through the exit code.
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config =
        CliConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(base_url = %config.base_url, "Starting claims client");

    let http_config = config.http_config().context("invalid HTTP configuration")?;
    let adapter = Arc::new(HttpClaimsApi::new(http_config)?);
    let store = ClaimsClientStore::new(adapter.clone());

    match execute(&cli.command, &store, adapter.as_ref()).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(error = ?error, "Command failed");
            eprintln!("{error}");
            Ok(ExitCode::FAILURE)
        }
    }
}
