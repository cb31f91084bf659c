//! Claims Prediction Client Store
//!
//! This crate holds the client-side state for the Kansas claims prediction
//! service: reference data (counties and claim types), the user's current
//! selections, the last fetched prediction range, and busy/error flags.
//!
//! The store talks to the remote service only through the `ClaimsApiPort`
//! trait, so the HTTP adapter can be swapped for a scripted one in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use claims_store::ClaimsClientStore;
//! use std::sync::Arc;
//!
//! let store = ClaimsClientStore::new(Arc::new(adapter));
//! store.load_initial_data().await;
//! let range = store.get_prediction_range("Sedgwick", "hail", Some(14)).await?;
//! ```

pub mod dto;
pub mod error;
pub mod ports;
pub mod state;
pub mod store;

pub use error::{ClientError, Operation, failure_message};
pub use ports::{ApiRequest, ClaimsApiPort, HttpMethod};
pub use state::ClaimsState;
pub use store::{ClaimsClientStore, DEFAULT_RANGE_DAYS};
