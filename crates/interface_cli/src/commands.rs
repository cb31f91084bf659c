//! Command definitions and dispatch

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use claims_store::{ClaimsClientStore, ClientError};
use core_kernel::{AdapterHealth, HealthCheckable};

/// Query the Kansas claims prediction service
#[derive(Debug, Parser)]
#[command(name = "claims-cli", version)]
pub struct Cli {
    /// Prediction service base URL, overrides configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration file (defaults to ./claims-client.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Load counties and claim types and show the default selection
    Reference,
    /// Predict claims for one county, claim type and date
    Predict {
        #[arg(long)]
        county: String,
        #[arg(long)]
        claim_type: String,
        /// Target date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Predict claims for the coming days
    Range {
        #[arg(long)]
        county: String,
        #[arg(long)]
        claim_type: String,
        /// Number of days, 30 when omitted
        #[arg(long)]
        days: Option<u32>,
    },
    /// Summary statistics for a county
    Summary {
        #[arg(long)]
        county: String,
    },
    /// Seasonal patterns for a county and claim type
    Insights {
        #[arg(long)]
        county: String,
        #[arg(long)]
        claim_type: String,
    },
    /// Ask the chat assistant a question
    Chat {
        message: String,
    },
    /// Check that the service is reachable
    Health,
}

/// Failure of a single command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to load reference data: {0}")]
    ReferenceData(String),

    #[error("Service is {status:?}: {message}")]
    Unhealthy {
        status: AdapterHealth,
        message: String,
    },

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Runs one command against the store and returns its JSON output
///
/// # Errors
///
/// Returns the store's error for the operation, the recorded reference-data
/// failure for `reference`, or `Unhealthy` when the health check fails.
pub async fn execute(
    command: &Command,
    store: &ClaimsClientStore,
    health: &dyn HealthCheckable,
) -> Result<Value, CommandError> {
    tracing::debug!(?command, "Executing command");

    match command {
        Command::Reference => {
            store.load_initial_data().await;
            let state = store.snapshot();
            if let Some(error) = state.error {
                return Err(CommandError::ReferenceData(error));
            }
            Ok(serde_json::json!({
                "counties": state.counties,
                "claim_types": state.claim_types,
                "selected_county": state.selected_county,
                "selected_claim_type": state.selected_claim_type,
            }))
        }
        Command::Predict {
            county,
            claim_type,
            date,
        } => Ok(store.get_prediction(county, claim_type, *date).await?),
        Command::Range {
            county,
            claim_type,
            days,
        } => {
            let predictions = store.get_prediction_range(county, claim_type, *days).await?;
            Ok(Value::Array(predictions))
        }
        Command::Summary { county } => Ok(store.get_county_summary(county).await?),
        Command::Insights { county, claim_type } => {
            Ok(store.get_seasonal_insights(county, claim_type).await?)
        }
        Command::Chat { message } => Ok(store.send_chat_message(message).await?),
        Command::Health => {
            let result = health.health_check().await;
            if result.status != AdapterHealth::Healthy {
                return Err(CommandError::Unhealthy {
                    status: result.status,
                    message: result.message.unwrap_or_default(),
                });
            }
            Ok(serde_json::to_value(result)?)
        }
    }
}
