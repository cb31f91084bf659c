//! Pre-built Test Fixtures
//!
//! Payloads shaped like the Kansas claims prediction service's responses.
//! They are consistent across calls so tests can assert on exact values.

use serde_json::{json, Value};

use crate::mock_api::MockClaimsApi;

/// Fixture for reference data
pub struct ReferenceFixtures;

impl ReferenceFixtures {
    pub fn counties() -> Vec<String> {
        ["Butler", "Johnson", "Sedgwick", "Shawnee"]
            .iter()
            .map(|county| county.to_string())
            .collect()
    }

    pub fn claim_types() -> Vec<String> {
        ["auto", "hail", "home", "wind"]
            .iter()
            .map(|claim_type| claim_type.to_string())
            .collect()
    }

    /// `GET /counties` body
    pub fn counties_payload(counties: &[String]) -> Value {
        json!({ "counties": counties })
    }

    /// `GET /claim-types` body
    pub fn claim_types_payload(claim_types: &[String]) -> Value {
        json!({ "claim_types": claim_types })
    }
}

/// Fixture for prediction payloads
pub struct PredictionFixtures;

impl PredictionFixtures {
    /// `POST /predict` body
    pub fn single(county: &str, claim_type: &str, date: &str) -> Value {
        json!({
            "county": county,
            "claim_type": claim_type,
            "date": date,
            "predicted_count": 12,
            "predicted_cost": 54000.0,
            "avg_cost_per_claim": 4500.0
        })
    }

    /// Records as they appear in a `GET /predict-range` body
    pub fn range_records() -> Vec<Value> {
        vec![
            json!({ "date": "2024-01-01", "predicted_count": 5, "predicted_cost": 21000.0 }),
            json!({ "date": "2024-01-02", "predicted_count": 7, "predicted_cost": 30100.0 }),
            json!({ "date": "2024-01-03", "predicted_count": 4, "predicted_cost": 16800.0 }),
        ]
    }

    /// `GET /predict-range` body wrapping the given records
    pub fn range_payload(records: &[Value]) -> Value {
        json!({ "predictions": records })
    }
}

/// Fixture for summary, insight and chat payloads
pub struct InsightFixtures;

impl InsightFixtures {
    pub fn county_summary(county: &str) -> Value {
        json!({
            "county": county,
            "summary": {
                "total_claims": 1840,
                "total_cost": 7_912_000.0,
                "avg_cost_per_claim": 4300.0,
                "most_common_claim_type": "hail"
            }
        })
    }

    pub fn seasonal_insights(county: &str, claim_type: &str) -> Value {
        json!({
            "county": county,
            "claim_type": claim_type,
            "insights": {
                "peak_month": 5,
                "low_month": 1,
                "monthly_averages": { "1": 2.1, "5": 9.8 }
            }
        })
    }

    pub fn chat_reply(response: &str) -> Value {
        json!({
            "response": response,
            "context": {},
            "usage": {
                "groq_requests_used": 1,
                "groq_requests_limit": 100,
                "limit_reached": false
            }
        })
    }
}

/// Fixture for whole scripted APIs
pub struct ApiFixtures;

impl ApiFixtures {
    /// A mock API that answers both reference data endpoints
    pub fn with_reference_data() -> MockClaimsApi {
        let api = MockClaimsApi::new();
        api.on_get(
            "/counties",
            ReferenceFixtures::counties_payload(&ReferenceFixtures::counties()),
        )
        .on_get(
            "/claim-types",
            ReferenceFixtures::claim_types_payload(&ReferenceFixtures::claim_types()),
        );
        api
    }
}
