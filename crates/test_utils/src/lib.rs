//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims client test suite.
//!
//! # Modules
//!
//! - `fixtures`: Canned API payloads shaped like the prediction service's
//! - `mock_api`: A scripted `ClaimsApiPort` that records requests
//! - `assertions`: Assertion helpers for store state and client errors

pub mod fixtures;
pub mod mock_api;
pub mod assertions;

pub use fixtures::*;
pub use mock_api::*;
pub use assertions::*;
