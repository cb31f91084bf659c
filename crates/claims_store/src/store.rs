//! Claims client store
//!
//! `ClaimsClientStore` mediates between a UI and the remote prediction API.
//! State lives in a `tokio::sync::watch` channel: the store writes through
//! `send_modify`, the UI reads a snapshot or subscribes for changes.
//!
//! # Tracked operations
//!
//! `load_initial_data`, `get_prediction` and `get_prediction_range` raise the
//! `loading` flag for their whole span. The flag is lowered by a drop guard,
//! so it is reset on success, on error, and when the caller drops the future.
//! Overlapping tracked calls share the flag; it stays raised until the last
//! one finishes.
//!
//! # Error reporting
//!
//! `load_initial_data` never fails: it records the failure text in
//! `ClaimsState::error`. All other operations return `ClientError`, whose
//! message is the server's `detail` or a per-operation fallback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use core_kernel::PortError;

use crate::dto::{
    ChatRequest, ClaimTypesEnvelope, CountiesEnvelope, PredictionRangeEnvelope, PredictionRequest,
};
use crate::error::{ClientError, Operation};
use crate::ports::{ApiRequest, ClaimsApiPort};
use crate::state::ClaimsState;

/// Day span requested by `get_prediction_range` when none is given
pub const DEFAULT_RANGE_DAYS: u32 = 30;

/// Client-side store for the claims prediction service
pub struct ClaimsClientStore {
    api: Arc<dyn ClaimsApiPort>,
    state: watch::Sender<ClaimsState>,
    in_flight: AtomicUsize,
}

impl ClaimsClientStore {
    /// Creates a store with empty state on top of the given API port
    pub fn new(api: Arc<dyn ClaimsApiPort>) -> Self {
        let (state, _) = watch::channel(ClaimsState::default());
        Self {
            api,
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> ClaimsState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ClaimsState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn counties(&self) -> Vec<String> {
        self.state.borrow().counties.clone()
    }

    pub fn claim_types(&self) -> Vec<String> {
        self.state.borrow().claim_types.clone()
    }

    pub fn selected_county(&self) -> Option<String> {
        self.state.borrow().selected_county.clone()
    }

    pub fn selected_claim_type(&self) -> Option<String> {
        self.state.borrow().selected_claim_type.clone()
    }

    pub fn predictions(&self) -> Vec<Value> {
        self.state.borrow().predictions.clone()
    }

    /// Fetches counties and claim types concurrently
    ///
    /// On success both lists are replaced and any unset selection defaults
    /// to the first entry of its list. On failure the lists are left as they
    /// were and the failure text is stored in `error`.
    #[instrument(skip(self))]
    pub async fn load_initial_data(&self) {
        let _loading = LoadingGuard::begin(self);

        match self.fetch_reference_data().await {
            Ok((counties, claim_types)) => {
                debug!(
                    counties = counties.len(),
                    claim_types = claim_types.len(),
                    "Reference data loaded"
                );
                self.state
                    .send_modify(|state| state.apply_reference_data(counties, claim_types));
            }
            Err(error) => {
                warn!(error = %error, "Failed to load reference data");
                let message = error.to_string();
                self.state.send_modify(|state| state.error = Some(message));
            }
        }
    }

    async fn fetch_reference_data(&self) -> Result<(Vec<String>, Vec<String>), PortError> {
        let (counties, claim_types) = tokio::try_join!(
            self.api.execute(ApiRequest::get(["counties"])),
            self.api.execute(ApiRequest::get(["claim-types"])),
        )?;

        let counties: CountiesEnvelope = decode(counties)?;
        let claim_types: ClaimTypesEnvelope = decode(claim_types)?;
        Ok((counties.counties, claim_types.claim_types))
    }

    /// Sends a free-text question to the chat endpoint
    ///
    /// # Errors
    ///
    /// Returns the server detail, or "Chat service unavailable"
    #[instrument(skip(self, message))]
    pub async fn send_chat_message(&self, message: &str) -> Result<Value, ClientError> {
        let body = encode(Operation::Chat, &ChatRequest { message })?;
        self.call(Operation::Chat, ApiRequest::post(["chat"], body)).await
    }

    /// Requests a single-date prediction
    ///
    /// # Errors
    ///
    /// Returns the server detail, or "Prediction failed"
    #[instrument(skip(self))]
    pub async fn get_prediction(
        &self,
        county: &str,
        claim_type: &str,
        target_date: NaiveDate,
    ) -> Result<Value, ClientError> {
        let _loading = LoadingGuard::begin(self);

        let body = encode(
            Operation::Prediction,
            &PredictionRequest {
                county,
                claim_type,
                target_date,
            },
        )?;
        self.call(Operation::Prediction, ApiRequest::post(["predict"], body))
            .await
    }

    /// Requests predictions for the next `days` days and keeps them in state
    ///
    /// `days` defaults to [`DEFAULT_RANGE_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns the server detail, or "Range prediction failed". On error the
    /// previously stored predictions are kept.
    #[instrument(skip(self))]
    pub async fn get_prediction_range(
        &self,
        county: &str,
        claim_type: &str,
        days: Option<u32>,
    ) -> Result<Vec<Value>, ClientError> {
        let _loading = LoadingGuard::begin(self);

        let days = days.unwrap_or(DEFAULT_RANGE_DAYS);
        let request =
            ApiRequest::get(["predict-range", county, claim_type]).with_query("days", days);
        let payload = self.call(Operation::PredictionRange, request).await?;

        let envelope: PredictionRangeEnvelope = decode(payload)
            .map_err(|error| ClientError::new(Operation::PredictionRange, error))?;
        let predictions = envelope.predictions;

        self.state
            .send_modify(|state| state.predictions = predictions.clone());
        Ok(predictions)
    }

    /// Fetches summary statistics for a county
    #[instrument(skip(self))]
    pub async fn get_county_summary(&self, county: &str) -> Result<Value, ClientError> {
        self.call(Operation::CountySummary, ApiRequest::get(["summary", county]))
            .await
    }

    /// Fetches seasonal patterns for a county and claim type
    #[instrument(skip(self))]
    pub async fn get_seasonal_insights(
        &self,
        county: &str,
        claim_type: &str,
    ) -> Result<Value, ClientError> {
        self.call(
            Operation::SeasonalInsights,
            ApiRequest::get(["insights", county, claim_type]),
        )
        .await
    }

    /// Not checked against the known county list
    pub fn set_selected_county(&self, county: Option<String>) {
        self.state.send_modify(|state| state.selected_county = county);
    }

    /// Not checked against the known claim-type list
    pub fn set_selected_claim_type(&self, claim_type: Option<String>) {
        self.state
            .send_modify(|state| state.selected_claim_type = claim_type);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    async fn call(&self, operation: Operation, request: ApiRequest) -> Result<Value, ClientError> {
        debug!(operation = operation.name(), %request, "Dispatching request");

        self.api.execute(request).await.map_err(|error| {
            debug!(operation = operation.name(), error = %error, "Request failed");
            ClientError::new(operation, error)
        })
    }
}

/// Raises `loading` on creation and lowers it on drop
///
/// The in-flight counter is only touched inside `send_modify`, which holds
/// the channel's write lock, so counter and flag never disagree.
struct LoadingGuard<'a> {
    store: &'a ClaimsClientStore,
}

impl<'a> LoadingGuard<'a> {
    fn begin(store: &'a ClaimsClientStore) -> Self {
        store.state.send_modify(|state| {
            store.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        });
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let in_flight = &self.store.in_flight;
        self.store.state.send_modify(|state| {
            let previous = in_flight.fetch_sub(1, Ordering::SeqCst);
            state.loading = previous > 1;
        });
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, PortError> {
    serde_json::from_value(payload).map_err(PortError::transformation)
}

fn encode<T: Serialize>(operation: Operation, body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body)
        .map_err(|error| ClientError::new(operation, PortError::transformation(error)))
}
