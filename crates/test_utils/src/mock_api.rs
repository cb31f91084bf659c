//! Scripted API Port
//!
//! `MockClaimsApi` answers requests from a table keyed by method and
//! unencoded path-and-query (e.g. `GET /predict-range/Sedgwick/hail?days=14`).
//! Unscripted requests get the 404 `{"detail": "Not Found"}` a FastAPI
//! service would send. Every request is recorded in arrival order.
//!
//! A route can be gated: its reply is held back until the returned `Notify`
//! is triggered, which lets a test observe the store mid-flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use claims_store::{ApiRequest, ClaimsApiPort, HttpMethod};
use core_kernel::{DomainPort, PortError};

#[derive(Debug, Clone)]
enum MockReply {
    Json(Value),
    Status { status: u16, detail: Option<String> },
    Disconnect(String),
}

impl MockReply {
    fn into_result(self) -> Result<Value, PortError> {
        match self {
            MockReply::Json(value) => Ok(value),
            MockReply::Status { status, detail } => Err(PortError::status(status, detail)),
            MockReply::Disconnect(message) => Err(PortError::connection(message)),
        }
    }
}

#[derive(Debug, Clone)]
struct MockRoute {
    reply: MockReply,
    gate: Option<Arc<Notify>>,
}

/// In-memory `ClaimsApiPort` with scripted replies
#[derive(Debug, Default)]
pub struct MockClaimsApi {
    routes: Mutex<HashMap<String, MockRoute>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockClaimsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `GET path` with a 2xx JSON body
    pub fn on_get(&self, path: &str, body: Value) -> &Self {
        self.script(HttpMethod::Get, path, MockReply::Json(body))
    }

    /// Answers `POST path` with a 2xx JSON body
    pub fn on_post(&self, path: &str, body: Value) -> &Self {
        self.script(HttpMethod::Post, path, MockReply::Json(body))
    }

    /// Answers with an error status and optional `detail`
    pub fn fail(&self, method: HttpMethod, path: &str, status: u16, detail: Option<&str>) -> &Self {
        self.script(
            method,
            path,
            MockReply::Status {
                status,
                detail: detail.map(str::to_string),
            },
        )
    }

    /// Answers as if the server could not be reached
    pub fn disconnect(&self, method: HttpMethod, path: &str) -> &Self {
        self.script(
            method,
            path,
            MockReply::Disconnect("connection refused".to_string()),
        )
    }

    /// Holds the reply of an already scripted route until the gate opens
    ///
    /// # Panics
    ///
    /// Panics if the route has not been scripted yet.
    pub fn gate(&self, method: HttpMethod, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        let mut routes = self.routes();
        let route = routes
            .get_mut(&route_key(method, path))
            .unwrap_or_else(|| panic!("no scripted route for {method} {path}"));
        route.gate = Some(gate.clone());
        gate
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.recorded().clone()
    }

    /// Number of requests received for `method path`
    pub fn request_count(&self, method: HttpMethod, path: &str) -> usize {
        self.recorded()
            .iter()
            .filter(|request| request.method == method && request.path_and_query() == path)
            .count()
    }

    /// Most recent request received for `method path`
    pub fn last_request(&self, method: HttpMethod, path: &str) -> Option<ApiRequest> {
        self.recorded()
            .iter()
            .rev()
            .find(|request| request.method == method && request.path_and_query() == path)
            .cloned()
    }

    fn script(&self, method: HttpMethod, path: &str, reply: MockReply) -> &Self {
        self.routes()
            .insert(route_key(method, path), MockRoute { reply, gate: None });
        self
    }

    fn routes(&self) -> MutexGuard<'_, HashMap<String, MockRoute>> {
        self.routes.lock().expect("mock route table poisoned")
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<ApiRequest>> {
        self.requests.lock().expect("mock request log poisoned")
    }
}

fn route_key(method: HttpMethod, path: &str) -> String {
    format!("{method} {path}")
}

impl DomainPort for MockClaimsApi {}

#[async_trait]
impl ClaimsApiPort for MockClaimsApi {
    async fn execute(&self, request: ApiRequest) -> Result<Value, PortError> {
        let key = route_key(request.method, &request.path_and_query());
        self.recorded().push(request);

        let route = self.routes().get(&key).cloned();
        let Some(route) = route else {
            return Err(PortError::status(404, Some("Not Found".to_string())));
        };

        if let Some(gate) = route.gate {
            gate.notified().await;
        }
        route.reply.into_result()
    }
}
