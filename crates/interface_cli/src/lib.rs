//! Command Line Interface
//!
//! This crate provides `claims-cli`, a thin shell around `ClaimsClientStore`
//! for querying the claims prediction service from a terminal.
//!
//! # Architecture
//!
//! - **Config**: Layered configuration (defaults, optional file, `CLAIMS_*` env)
//! - **Commands**: clap definitions and dispatch onto store operations
//! - **Telemetry**: tracing subscriber setup
//!
//! # Example
//!
//! ```bash
//! claims-cli range --county Sedgwick --claim-type hail --days 14
//! ```

pub mod config;
pub mod commands;
pub mod telemetry;

pub use commands::{Cli, Command, CommandError, execute};
pub use config::{CliConfig, LogFormat};
