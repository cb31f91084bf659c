//! Claims API Port
//!
//! Defines the single interface the store needs from the remote prediction
//! service. Adapters implement it:
//!
//! - **HTTP Adapter**: `infra_http::HttpClaimsApi`, backed by reqwest
//! - **Mock Adapter**: `test_utils::MockClaimsApi`, scripted responses for tests
//!
//! Requests are described transport-neutrally as a method, a list of raw
//! path segments, query pairs and an optional JSON body. Percent-encoding of
//! segments is the adapter's job.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::{DomainPort, PortError};

/// HTTP method used by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request against the claims prediction API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Unencoded path segments, e.g. `["predict-range", "Sedgwick", "hail"]`
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a GET request for the given path segments
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request carrying a JSON body
    pub fn post<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Unencoded path, always starting with `/`
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Unencoded path followed by the query string, if any
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path(), query)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

/// Port to the remote claims prediction service
///
/// A successful call yields the decoded JSON body of a 2xx response. Any
/// other outcome is reported as a `PortError`.
#[async_trait]
pub trait ClaimsApiPort: DomainPort {
    /// Sends a request and returns the decoded JSON response body
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError>;
}
