//! HTTP Claims API Adapter
//!
//! This module provides the reqwest-backed adapter for the claims domain,
//! implementing the `ClaimsApiPort` trait against the prediction service.
//!
//! # Overview
//!
//! The `HttpClaimsApi` serves as the bridge between the store's transport-
//! neutral `ApiRequest` and the wire. It:
//!
//! - Appends percent-encoded path segments and query pairs to the base URL
//! - Tags every request with an `x-request-id` correlation header
//! - Translates non-2xx responses into `PortError::Status`, keeping the
//!   server's `detail` when the body carries one
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{HttpClaimsApi, HttpClientConfig};
//! use claims_store::ClaimsApiPort;
//! use std::sync::Arc;
//!
//! let adapter = HttpClaimsApi::new(HttpClientConfig::new("http://localhost:3001")?)?;
//! let port: Arc<dyn ClaimsApiPort> = Arc::new(adapter);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use claims_store::{ApiRequest, ClaimsApiPort, HttpMethod};
use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};

use crate::client::{create_client, HttpClientConfig, REQUEST_ID_HEADER};
use crate::error::HttpConfigError;

const ADAPTER_ID: &str = "http-claims-api";

/// reqwest-backed implementation of the `ClaimsApiPort` trait
///
/// # Health Checking
///
/// The adapter implements `HealthCheckable` by calling the service root
/// (`GET /`), which answers with a short banner message.
///
/// # Error Handling
///
/// - No response (connect, DNS, timeout) -> `PortError::Connection`
/// - Non-2xx response -> `PortError::Status` with the optional `detail`
/// - 2xx body that is not JSON -> `PortError::Transformation`
#[derive(Debug, Clone)]
pub struct HttpClaimsApi {
    client: Client,
    base_url: Url,
}

impl HttpClaimsApi {
    /// Creates an adapter with a client built from the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be built
    pub fn new(config: HttpClientConfig) -> Result<Self, HttpConfigError> {
        let client = create_client(&config)?;
        Ok(Self::with_client(client, config.base_url))
    }

    /// Creates an adapter reusing an existing client
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request against the base URL
    ///
    /// Segments are appended after any path the base URL already has and
    /// are percent-encoded, so `"Red Willow"` becomes `Red%20Willow`.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, PortError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| PortError::transformation("base URL cannot carry a path"))?;
            segments.pop_if_empty().extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        request: &ApiRequest,
        metadata: &OperationMetadata,
    ) -> Result<Value, PortError> {
        let url = self.url_for(request)?;

        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        let builder = builder.header(REQUEST_ID_HEADER, metadata.correlation_id.as_str());
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            PortError::connection_with_source(format!("{request} could not be sent"), e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            PortError::connection_with_source("failed to read response body", e)
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        if !status.is_success() {
            return Err(PortError::from_error_body(status.as_u16(), &body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(PortError::transformation)
    }
}

// Mark as a domain port
impl DomainPort for HttpClaimsApi {}

#[async_trait]
impl ClaimsApiPort for HttpClaimsApi {
    #[instrument(
        skip(self, request),
        fields(
            method = %request.method,
            path = %request.path(),
            request_id = tracing::field::Empty
        )
    )]
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError> {
        let metadata = OperationMetadata::new();
        tracing::Span::current().record("request_id", metadata.correlation_id.as_str());
        debug!("Sending request");

        self.send(&request, &metadata).await
    }
}

#[async_trait]
impl HealthCheckable for HttpClaimsApi {
    /// Checks that the prediction service answers on its root path
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = self.execute(ApiRequest::get(Vec::<String>::new())).await;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (status, message) = match result {
            Ok(body) => (
                AdapterHealth::Healthy,
                body.get("message").and_then(Value::as_str).map(str::to_string),
            ),
            Err(e @ PortError::Status { .. }) => (AdapterHealth::Degraded, Some(e.to_string())),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}
