//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types shared by the claims domain
//! port and the adapters that implement it.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       UI / CLI Layer                         │
//! │                (owns a ClaimsClientStore)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Port Trait                             │
//! │           ClaimsApiPort (defined in claims_store)            │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │   HTTP Adapter    │     │   Mock Adapter   │
//!         │    (infra_http)   │     │   (test_utils)   │
//!         └───────────────────┘     └──────────────────┘
//! ```

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the domain can turn
/// them into user-facing messages without knowing which transport is in use.
#[derive(Debug, Error)]
pub enum PortError {
    /// The remote service answered with a non-success status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// Human-readable `detail` field from the error body, if any
        detail: Option<String>,
    },

    /// No response was received
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body could not be interpreted
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    /// Creates a Status error
    pub fn status(status: u16, detail: Option<String>) -> Self {
        PortError::Status { status, detail }
    }

    /// Creates a Status error from a raw error response body
    ///
    /// The body is searched for a JSON object carrying a non-empty string
    /// `detail` field. Anything else (empty body, plain text, a structured
    /// `detail`) leaves the detail unset.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        PortError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Connection error that keeps the underlying cause
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl fmt::Display) -> Self {
        PortError::Transformation {
            message: message.to_string(),
        }
    }

    /// Returns the server-provided detail, if the remote side sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            PortError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status for error responses
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PortError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_detail(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Remote side answered, but not with a success status
    Degraded,
    /// Remote side could not be reached
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    ///
    /// # Returns
    ///
    /// A `HealthCheckResult` indicating the current health status
    async fn health_check(&self) -> HealthCheckResult;
}

/// Metadata about a port operation for tracing across systems
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Correlation ID sent with the request
    pub correlation_id: String,
}

impl OperationMetadata {
    /// Creates metadata with a fresh random correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Creates metadata with a caller-supplied correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }
}

impl Default for OperationMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_port_error_status_display() {
        let error = PortError::status(500, None);
        assert_eq!(error.to_string(), "Request failed with status code 500");
        assert_eq!(error.http_status(), Some(500));
        assert!(error.detail().is_none());
    }

    #[test]
    fn test_port_error_from_error_body_with_detail() {
        let error = PortError::from_error_body(404, br#"{"detail":"county not found"}"#);
        assert_eq!(error.detail(), Some("county not found"));
        assert_eq!(error.http_status(), Some(404));
    }

    #[test]
    fn test_port_error_from_error_body_without_detail() {
        assert!(PortError::from_error_body(500, b"").detail().is_none());
        assert!(PortError::from_error_body(500, b"Internal Server Error").detail().is_none());
        assert!(PortError::from_error_body(500, br#"{"message":"boom"}"#).detail().is_none());
        assert!(PortError::from_error_body(500, br#"{"detail":""}"#).detail().is_none());
    }

    #[test]
    fn test_port_error_from_error_body_structured_detail_is_ignored() {
        let body = br#"{"detail":[{"loc":["body","county"],"msg":"field required"}]}"#;
        assert!(PortError::from_error_body(422, body).detail().is_none());
    }

    #[test]
    fn test_connection_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = PortError::connection_with_source("could not reach service", io);

        assert!(error.to_string().contains("could not reach service"));
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.http_status().is_none());
    }

    #[test]
    fn test_operation_metadata_generates_unique_ids() {
        let first = OperationMetadata::new();
        let second = OperationMetadata::new();
        assert_ne!(first.correlation_id, second.correlation_id);
        assert!(Uuid::parse_str(&first.correlation_id).is_ok());
    }

    proptest! {
        #[test]
        fn prop_string_detail_is_extracted_verbatim(detail in ".{1,64}") {
            let body = serde_json::json!({ "detail": detail.clone() }).to_string();
            let error = PortError::from_error_body(400, body.as_bytes());
            prop_assert_eq!(error.detail(), Some(detail.as_str()));
        }
    }
}
