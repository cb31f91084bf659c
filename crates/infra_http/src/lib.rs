//! Infrastructure HTTP Layer
//!
//! This crate provides the HTTP adapter for the claims prediction service,
//! implementing the `ClaimsApiPort` from `claims_store` on top of reqwest.
//!
//! # Architecture
//!
//! The domain layer only sees the port trait. This crate owns everything
//! transport-specific: base URL handling, percent-encoding of path segments,
//! request correlation headers, and translation of HTTP outcomes into
//! `PortError` values.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{HttpClientConfig, HttpClaimsApi};
//! use claims_store::ClaimsClientStore;
//! use std::sync::Arc;
//!
//! let config = HttpClientConfig::new("http://localhost:3001")?;
//! let store = ClaimsClientStore::new(Arc::new(HttpClaimsApi::new(config)?));
//! ```

pub mod client;
pub mod error;
pub mod adapters;

pub use client::{HttpClientConfig, create_client, DEFAULT_BASE_URL, REQUEST_ID_HEADER};
pub use error::HttpConfigError;
pub use adapters::HttpClaimsApi;
