//! HTTP client configuration
//!
//! This module provides client configuration and creation for the claims
//! prediction API. No timeout is set unless one is configured, so requests
//! run under reqwest's defaults.

use std::time::Duration;

use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::HttpConfigError;

/// Base URL of a locally running prediction service
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Configuration options for the HTTP client
///
/// # Example
///
/// ```rust,ignore
/// use infra_http::HttpClientConfig;
///
/// let config = HttpClientConfig::new("http://localhost:3001")?
///     .timeout(Duration::from_secs(10))
///     .user_agent("claims-dashboard/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL every request path is appended to
    pub base_url: Url,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl HttpClientConfig {
    /// Creates a configuration for the given base URL
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, e.g. "http://localhost:3001" or "https://host/api/"
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not http(s), or cannot
    /// carry a path.
    pub fn new(base_url: &str) -> Result<Self, HttpConfigError> {
        let url = Url::parse(base_url).map_err(|e| HttpConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.cannot_be_a_base() {
            return Err(HttpConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url: url,
            timeout: None,
            user_agent: format!("claims-client/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets a whole-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header value
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Creates a reqwest client with the given configuration
///
/// # Errors
///
/// Returns `HttpConfigError::ClientBuild` if the TLS backend or other client
/// settings cannot be initialised
pub fn create_client(config: &HttpClientConfig) -> Result<Client, HttpConfigError> {
    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "Creating HTTP client"
    );

    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| HttpConfigError::ClientBuild(e.to_string()))
}
