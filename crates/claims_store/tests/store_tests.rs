//! Store Behaviour Tests
//!
//! Exercises `ClaimsClientStore` against the scripted `MockClaimsApi`.
//!
//! # Test Organization
//!
//! - `reference_data` - `load_initial_data` success, defaulting and failure
//! - `loading_flag` - flag lifecycle for tracked and untracked operations
//! - `predictions` - single and range predictions
//! - `insights` - chat, summary and seasonal insights
//! - `selection` - setters and `clear_error`

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use claims_store::{ClaimsClientStore, HttpMethod, DEFAULT_RANGE_DAYS};
use test_utils::{
    assert_at_rest, assert_client_error, ApiFixtures, InsightFixtures, MockClaimsApi,
    PredictionFixtures, ReferenceFixtures,
};

fn store_over(api: &Arc<MockClaimsApi>) -> ClaimsClientStore {
    ClaimsClientStore::new(api.clone())
}

// ============================================================================
// Reference Data Tests
// ============================================================================

mod reference_data {
    use super::*;

    #[tokio::test]
    async fn test_load_initial_data_stores_lists_and_defaults_selection() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        let store = store_over(&api);

        store.load_initial_data().await;

        let state = store.snapshot();
        assert_eq!(state.counties, ReferenceFixtures::counties());
        assert_eq!(state.claim_types, ReferenceFixtures::claim_types());
        assert_eq!(state.selected_county.as_deref(), Some("Butler"));
        assert_eq!(state.selected_claim_type.as_deref(), Some("auto"));
        assert!(state.error.is_none());
        assert_at_rest(&state);
    }

    #[tokio::test]
    async fn test_load_initial_data_fetches_both_endpoints() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        let store = store_over(&api);

        store.load_initial_data().await;

        assert_eq!(api.request_count(HttpMethod::Get, "/counties"), 1);
        assert_eq!(api.request_count(HttpMethod::Get, "/claim-types"), 1);
    }

    #[tokio::test]
    async fn test_empty_lists_leave_selection_unset() {
        let api = Arc::new(MockClaimsApi::new());
        api.on_get("/counties", json!({ "counties": [] }))
            .on_get("/claim-types", json!({ "claim_types": [] }));
        let store = store_over(&api);

        store.load_initial_data().await;

        assert!(store.counties().is_empty());
        assert!(store.selected_county().is_none());
        assert!(store.selected_claim_type().is_none());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_reload_preserves_existing_selection() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        let store = store_over(&api);
        store.set_selected_county(Some("Sedgwick".to_string()));

        store.load_initial_data().await;
        store.load_initial_data().await;

        assert_eq!(store.selected_county().as_deref(), Some("Sedgwick"));
        assert_eq!(store.selected_claim_type().as_deref(), Some("auto"));
    }

    #[tokio::test]
    async fn test_failure_records_error_and_keeps_lists() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        let store = store_over(&api);
        store.load_initial_data().await;

        api.fail(HttpMethod::Get, "/claim-types", 500, Some("Models not loaded"));
        store.load_initial_data().await;

        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some("Request failed with status code 500"));
        assert_eq!(state.counties, ReferenceFixtures::counties());
        assert_eq!(state.claim_types, ReferenceFixtures::claim_types());
        assert_at_rest(&state);
    }

    #[tokio::test]
    async fn test_network_failure_records_error() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        api.disconnect(HttpMethod::Get, "/counties");
        let store = store_over(&api);

        store.load_initial_data().await;

        assert_eq!(
            store.error().as_deref(),
            Some("Connection error: connection refused")
        );
        assert!(store.counties().is_empty());
        assert!(store.selected_county().is_none());
    }

    #[tokio::test]
    async fn test_malformed_envelope_records_error() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        api.on_get("/counties", json!({ "names": ["Butler"] }));
        let store = store_over(&api);

        store.load_initial_data().await;

        let error = store.error().expect("error should be recorded");
        assert!(error.starts_with("Transformation error"), "got {error}");
        assert!(store.counties().is_empty());
    }
}

// ============================================================================
// Loading Flag Tests
// ============================================================================

mod loading_flag {
    use super::*;

    #[tokio::test]
    async fn test_loading_is_false_before_any_call() {
        let api = Arc::new(MockClaimsApi::new());
        let store = store_over(&api);

        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_loading_is_set_while_range_prediction_in_flight() {
        let api = Arc::new(MockClaimsApi::new());
        let path = "/predict-range/Sedgwick/hail?days=30";
        api.on_get(path, PredictionFixtures::range_payload(&[]));
        let gate = api.gate(HttpMethod::Get, path);
        let store = store_over(&api);
        let mut updates = store.subscribe();

        let call = store.get_prediction_range("Sedgwick", "hail", None);
        let observe = async {
            updates.wait_for(|state| state.loading).await.map(|_| ()).unwrap();
            gate.notify_one();
        };
        let (result, ()) = tokio::join!(call, observe);

        assert!(result.is_ok());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_loading_is_set_while_initial_data_in_flight() {
        let api = Arc::new(ApiFixtures::with_reference_data());
        let gate = api.gate(HttpMethod::Get, "/counties");
        let store = store_over(&api);
        let mut updates = store.subscribe();

        let call = store.load_initial_data();
        let observe = async {
            updates.wait_for(|state| state.loading).await.map(|_| ()).unwrap();
            gate.notify_one();
        };
        tokio::join!(call, observe);

        assert_at_rest(&store.snapshot());
    }

    #[tokio::test]
    async fn test_loading_is_reset_after_failure() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Post, "/predict", 500, None);
        let store = store_over(&api);

        let result = store
            .get_prediction("Sedgwick", "hail", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .await;

        assert!(result.is_err());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_calls_keep_loading_until_last_finishes() {
        let api = Arc::new(MockClaimsApi::new());
        let first = "/predict-range/Butler/wind?days=7";
        let second = "/predict-range/Johnson/hail?days=7";
        api.on_get(first, PredictionFixtures::range_payload(&[]))
            .on_get(second, PredictionFixtures::range_payload(&[]));
        let first_gate = api.gate(HttpMethod::Get, first);
        let second_gate = api.gate(HttpMethod::Get, second);
        let store = store_over(&api);
        let mut updates = store.subscribe();

        let first_call = store.get_prediction_range("Butler", "wind", Some(7));
        let second_call = store.get_prediction_range("Johnson", "hail", Some(7));
        let observe = async {
            updates.wait_for(|state| state.loading).await.map(|_| ()).unwrap();
            first_gate.notify_one();
            while api.request_count(HttpMethod::Get, second) == 0 {
                tokio::task::yield_now().await;
            }
            tokio::task::yield_now().await;
            assert!(store.is_loading(), "second call is still pending");
            second_gate.notify_one();
        };
        let (first_result, second_result, ()) = tokio::join!(first_call, second_call, observe);

        assert!(first_result.is_ok());
        assert!(second_result.is_ok());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_dropped_call_resets_loading() {
        let api = Arc::new(MockClaimsApi::new());
        let path = "/predict-range/Sedgwick/hail?days=30";
        api.on_get(path, PredictionFixtures::range_payload(&[]));
        let _gate = api.gate(HttpMethod::Get, path);
        let store = store_over(&api);

        {
            let call = store.get_prediction_range("Sedgwick", "hail", None);
            let timed_out =
                tokio::time::timeout(std::time::Duration::from_millis(20), call).await;
            assert!(timed_out.is_err());
        }

        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_untracked_operations_do_not_touch_loading() {
        let api = Arc::new(MockClaimsApi::new());
        api.on_get("/summary/Sedgwick", InsightFixtures::county_summary("Sedgwick"));
        let gate = api.gate(HttpMethod::Get, "/summary/Sedgwick");
        let store = store_over(&api);

        let call = store.get_county_summary("Sedgwick");
        let observe = async {
            while api.request_count(HttpMethod::Get, "/summary/Sedgwick") == 0 {
                tokio::task::yield_now().await;
            }
            assert!(!store.is_loading());
            gate.notify_one();
        };
        let (result, ()) = tokio::join!(call, observe);

        assert!(result.is_ok());
        assert!(!store.is_loading());
    }
}

// ============================================================================
// Prediction Tests
// ============================================================================

mod predictions {
    use super::*;

    #[tokio::test]
    async fn test_prediction_range_stores_and_returns_records() {
        let api = Arc::new(MockClaimsApi::new());
        let records = vec![json!({ "date": "2024-01-01", "value": 5 })];
        api.on_get(
            "/predict-range/Sedgwick/hail?days=14",
            PredictionFixtures::range_payload(&records),
        );
        let store = store_over(&api);

        let returned = store
            .get_prediction_range("Sedgwick", "hail", Some(14))
            .await
            .unwrap();

        assert_eq!(returned, records);
        assert_eq!(store.predictions(), records);
        assert_eq!(
            api.request_count(HttpMethod::Get, "/predict-range/Sedgwick/hail?days=14"),
            1
        );
    }

    #[tokio::test]
    async fn test_prediction_range_defaults_to_thirty_days() {
        let api = Arc::new(MockClaimsApi::new());
        let path = format!("/predict-range/Shawnee/home?days={DEFAULT_RANGE_DAYS}");
        api.on_get(&path, PredictionFixtures::range_payload(&PredictionFixtures::range_records()));
        let store = store_over(&api);

        let returned = store.get_prediction_range("Shawnee", "home", None).await.unwrap();

        assert_eq!(returned.len(), 3);
        assert_eq!(path, "/predict-range/Shawnee/home?days=30");
    }

    #[tokio::test]
    async fn test_prediction_range_overwrites_previous_batch() {
        let api = Arc::new(MockClaimsApi::new());
        api.on_get(
            "/predict-range/Butler/hail?days=3",
            PredictionFixtures::range_payload(&PredictionFixtures::range_records()),
        )
        .on_get(
            "/predict-range/Butler/hail?days=1",
            PredictionFixtures::range_payload(&[json!({ "date": "2024-02-01" })]),
        );
        let store = store_over(&api);

        store.get_prediction_range("Butler", "hail", Some(3)).await.unwrap();
        store.get_prediction_range("Butler", "hail", Some(1)).await.unwrap();

        assert_eq!(store.predictions(), vec![json!({ "date": "2024-02-01" })]);
    }

    #[tokio::test]
    async fn test_prediction_range_failure_keeps_previous_batch() {
        let api = Arc::new(MockClaimsApi::new());
        api.on_get(
            "/predict-range/Butler/hail?days=3",
            PredictionFixtures::range_payload(&PredictionFixtures::range_records()),
        );
        api.fail(HttpMethod::Get, "/predict-range/Butler/hail?days=5", 500, None);
        let store = store_over(&api);
        store.get_prediction_range("Butler", "hail", Some(3)).await.unwrap();

        let result = store.get_prediction_range("Butler", "hail", Some(5)).await;

        assert_client_error(&result, "Range prediction failed");
        assert_eq!(store.predictions(), PredictionFixtures::range_records());
    }

    #[tokio::test]
    async fn test_prediction_range_without_envelope_uses_fallback() {
        let api = Arc::new(MockClaimsApi::new());
        api.on_get("/predict-range/Butler/hail?days=2", json!([1, 2]));
        let store = store_over(&api);

        let result = store.get_prediction_range("Butler", "hail", Some(2)).await;

        assert_client_error(&result, "Range prediction failed");
        assert!(store.predictions().is_empty());
    }

    #[tokio::test]
    async fn test_prediction_posts_request_body() {
        let api = Arc::new(MockClaimsApi::new());
        let payload = PredictionFixtures::single("Sedgwick", "hail", "2024-06-01");
        api.on_post("/predict", payload.clone());
        let store = store_over(&api);

        let returned = store
            .get_prediction("Sedgwick", "hail", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .await
            .unwrap();

        assert_eq!(returned, payload);
        let request = api.last_request(HttpMethod::Post, "/predict").unwrap();
        assert_eq!(
            request.body,
            Some(json!({ "county": "Sedgwick", "claim_type": "hail", "target_date": "2024-06-01" }))
        );
    }

    #[tokio::test]
    async fn test_prediction_error_uses_server_detail() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Post, "/predict", 404, Some("county not found"));
        let store = store_over(&api);

        let result = store
            .get_prediction("Nowhere", "hail", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .await;

        assert_client_error(&result, "county not found");
        assert_eq!(result.unwrap_err().status(), Some(404));
    }

    #[tokio::test]
    async fn test_prediction_error_without_body_uses_fallback() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Post, "/predict", 500, None);
        let store = store_over(&api);

        let result = store
            .get_prediction("Sedgwick", "hail", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .await;

        assert_client_error(&result, "Prediction failed");
    }

    #[tokio::test]
    async fn test_prediction_errors_do_not_set_error_field() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Post, "/predict", 400, Some("Invalid input: bad date"));
        let store = store_over(&api);

        let _ = store
            .get_prediction("Sedgwick", "hail", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .await;

        assert!(store.error().is_none());
    }
}

// ============================================================================
// Chat, Summary and Insights Tests
// ============================================================================

mod insights {
    use super::*;

    #[tokio::test]
    async fn test_chat_returns_raw_payload() {
        let api = Arc::new(MockClaimsApi::new());
        let reply = InsightFixtures::chat_reply("Hail claims peak in May.");
        api.on_post("/chat", reply.clone());
        let store = store_over(&api);

        let returned = store.send_chat_message("When do hail claims peak?").await.unwrap();

        assert_eq!(returned, reply);
        let request = api.last_request(HttpMethod::Post, "/chat").unwrap();
        assert_eq!(request.body, Some(json!({ "message": "When do hail claims peak?" })));
    }

    #[tokio::test]
    async fn test_chat_failure_messages() {
        let api = Arc::new(MockClaimsApi::new());
        api.disconnect(HttpMethod::Post, "/chat");
        let store = store_over(&api);
        assert_client_error(&store.send_chat_message("hi").await, "Chat service unavailable");

        api.fail(HttpMethod::Post, "/chat", 500, Some("Predictor not available"));
        assert_client_error(&store.send_chat_message("hi").await, "Predictor not available");
    }

    #[tokio::test]
    async fn test_county_summary_returns_raw_payload() {
        let api = Arc::new(MockClaimsApi::new());
        let summary = InsightFixtures::county_summary("Johnson");
        api.on_get("/summary/Johnson", summary.clone());
        let store = store_over(&api);

        assert_eq!(store.get_county_summary("Johnson").await.unwrap(), summary);
    }

    #[tokio::test]
    async fn test_county_summary_failure_uses_fallback() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Get, "/summary/Johnson", 500, None);
        let store = store_over(&api);

        assert_client_error(&store.get_county_summary("Johnson").await, "Summary unavailable");
    }

    #[tokio::test]
    async fn test_seasonal_insights_returns_raw_payload() {
        let api = Arc::new(MockClaimsApi::new());
        let insights = InsightFixtures::seasonal_insights("Butler", "wind");
        api.on_get("/insights/Butler/wind", insights.clone());
        let store = store_over(&api);

        assert_eq!(store.get_seasonal_insights("Butler", "wind").await.unwrap(), insights);
    }

    #[tokio::test]
    async fn test_seasonal_insights_failure_messages() {
        let api = Arc::new(MockClaimsApi::new());
        api.fail(HttpMethod::Get, "/insights/Butler/wind", 404, Some("Insufficient data for insights"));
        api.fail(HttpMethod::Get, "/insights/Butler/auto", 500, None);
        let store = store_over(&api);

        assert_client_error(
            &store.get_seasonal_insights("Butler", "wind").await,
            "Insufficient data for insights",
        );
        assert_client_error(
            &store.get_seasonal_insights("Butler", "auto").await,
            "Insights unavailable",
        );
    }
}

// ============================================================================
// Selection and Error Tests
// ============================================================================

mod selection {
    use super::*;

    #[test]
    fn test_setters_accept_values_outside_known_lists() {
        let api = Arc::new(MockClaimsApi::new());
        let store = store_over(&api);

        store.set_selected_county(Some("Atlantis".to_string()));
        store.set_selected_claim_type(Some("meteor".to_string()));

        assert_eq!(store.selected_county().as_deref(), Some("Atlantis"));
        assert_eq!(store.selected_claim_type().as_deref(), Some("meteor"));

        store.set_selected_county(None);
        assert!(store.selected_county().is_none());
    }

    #[tokio::test]
    async fn test_clear_error_resets_recorded_failure() {
        let api = Arc::new(MockClaimsApi::new());
        let store = store_over(&api);
        store.load_initial_data().await;
        assert!(store.error().is_some());

        store.clear_error();

        assert!(store.error().is_none());
    }

    #[test]
    fn test_clear_error_without_error_is_noop() {
        let api = Arc::new(MockClaimsApi::new());
        let store = store_over(&api);

        store.clear_error();

        assert!(store.error().is_none());
    }

    #[test]
    fn test_subscribers_observe_selection_changes() {
        let api = Arc::new(MockClaimsApi::new());
        let store = store_over(&api);
        let mut updates = store.subscribe();

        store.set_selected_claim_type(Some("hail".to_string()));

        assert!(updates.has_changed().unwrap());
        assert_eq!(
            updates.borrow_and_update().selected_claim_type.as_deref(),
            Some("hail")
        );
    }
}
