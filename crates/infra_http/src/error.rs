//! HTTP adapter configuration errors

use thiserror::Error;

/// Errors raised while configuring the HTTP adapter
#[derive(Debug, Error)]
pub enum HttpConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}
