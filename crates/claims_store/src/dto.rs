//! Request bodies and response envelopes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    pub county: &'a str,
    pub claim_type: &'a str,
    /// Serialized as `YYYY-MM-DD`
    pub target_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CountiesEnvelope {
    pub counties: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClaimTypesEnvelope {
    pub claim_types: Vec<String>,
}

/// Range predictions are kept opaque; the store never looks inside a record.
#[derive(Debug, Deserialize)]
pub struct PredictionRangeEnvelope {
    pub predictions: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_request_wire_format() {
        let request = PredictionRequest {
            county: "Sedgwick",
            claim_type: "hail",
            target_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "county": "Sedgwick", "claim_type": "hail", "target_date": "2024-06-01" })
        );
    }

    #[test]
    fn test_envelope_requires_named_field() {
        let result = serde_json::from_value::<CountiesEnvelope>(json!({ "claim_types": [] }));
        assert!(result.is_err());
    }
}
