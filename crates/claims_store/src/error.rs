//! Claims client errors

use thiserror::Error;

use core_kernel::PortError;

/// Store operations that report failures to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Chat,
    Prediction,
    PredictionRange,
    CountySummary,
    SeasonalInsights,
}

impl Operation {
    /// Message used when the server does not supply a `detail`
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::Chat => "Chat service unavailable",
            Operation::Prediction => "Prediction failed",
            Operation::PredictionRange => "Range prediction failed",
            Operation::CountySummary => "Summary unavailable",
            Operation::SeasonalInsights => "Insights unavailable",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Chat => "send_chat_message",
            Operation::Prediction => "get_prediction",
            Operation::PredictionRange => "get_prediction_range",
            Operation::CountySummary => "get_county_summary",
            Operation::SeasonalInsights => "get_seasonal_insights",
        }
    }
}

/// Selects the user-facing message for a failed operation
///
/// The server's `detail` wins; every other failure, including network
/// errors and malformed bodies, collapses to the operation's fallback.
pub fn failure_message(operation: Operation, error: &PortError) -> String {
    error
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| operation.fallback_message().to_string())
}

/// Error returned by every store operation except `load_initial_data`
///
/// Displays as the human-readable message only.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    operation: Operation,
    message: String,
    #[source]
    source: PortError,
}

impl ClientError {
    pub fn new(operation: Operation, source: PortError) -> Self {
        Self {
            operation,
            message: failure_message(operation, &source),
            source,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the error response, if one was received
    pub fn status(&self) -> Option<u16> {
        self.source.http_status()
    }

    pub fn port_error(&self) -> &PortError {
        &self.source
    }
}
