#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::body::Bytes;
use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;

use filmdash::{Api, ApiClient, ApiClientConfig};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

/// In-process stand-in for the dashboard backend. Serves canned bodies by
/// path and records every request it receives.
#[derive(Clone, Default)]
pub struct FakeBackend {
    responses: Arc<HashMap<String, (StatusCode, Value)>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeBackend {
    pub fn new(responses: Vec<(&str, StatusCode, Value)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();
        Self {
            responses: Arc::new(responses),
            seen: Arc::default(),
        }
    }

    pub fn ok(path: &str, body: Value) -> Self {
        Self::new(vec![(path, StatusCode::OK, body)])
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(respond).with_state(self.clone())
    }
}

async fn respond(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let body = (!body.is_empty()).then(|| serde_json::from_slice(&body).unwrap());
    backend.seen.lock().unwrap().push(SeenRequest {
        method,
        path: path.clone(),
        query,
        body,
    });
    match backend.responses.get(&path) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": format!("no route for {}", path) })),
        ),
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn api_for(backend: &FakeBackend) -> Api {
    let base_url = serve(backend.router()).await;
    Api::new(ApiClient::new(ApiClientConfig::with_base_url(base_url)).unwrap())
}
