//! Observable store state

use serde::Serialize;
use serde_json::Value;

/// Everything a UI needs to render the claims views
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClaimsState {
    pub counties: Vec<String>,
    pub claim_types: Vec<String>,
    pub selected_county: Option<String>,
    pub selected_claim_type: Option<String>,
    /// Last range prediction result
    pub predictions: Vec<Value>,
    /// True while at least one tracked operation is in flight
    pub loading: bool,
    /// Last `load_initial_data` failure
    pub error: Option<String>,
}

impl ClaimsState {
    /// Stores freshly fetched reference data and defaults unset selections
    pub(crate) fn apply_reference_data(&mut self, counties: Vec<String>, claim_types: Vec<String>) {
        if self.selected_county.is_none() {
            self.selected_county = counties.first().cloned();
        }
        if self.selected_claim_type.is_none() {
            self.selected_claim_type = claim_types.first().cloned();
        }
        self.counties = counties;
        self.claim_types = claim_types;
    }
}
