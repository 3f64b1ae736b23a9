//! Common test utilities and helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use larder_core::AppState;
use larder_llm::{GenerationConfig, GenerationService, ProviderConfig};
use larder_store::PantryStore;

/// Build an app over an isolated in-memory store and an unconfigured relay.
pub fn test_app() -> (Router, Arc<PantryStore>) {
    let store = Arc::new(PantryStore::in_memory());
    (app_over(store.clone(), GenerationConfig::default()), store)
}

/// Build an app whose relay talks to an OpenAI-compatible mock at `base_url`.
pub fn test_app_with_relay(base_url: String) -> (Router, Arc<PantryStore>) {
    let config = GenerationConfig {
        providers: vec![ProviderConfig {
            name: "openai".to_string(),
            base_url,
            model: "gpt-4o-mini".to_string(),
            api_key: "test-key".to_string(),
            priority: 1,
        }],
    };
    let store = Arc::new(PantryStore::in_memory());
    (app_over(store.clone(), config), store)
}

/// Build an app over an existing store, e.g. a file-backed one.
pub fn app_over(store: Arc<PantryStore>, config: GenerationConfig) -> Router {
    let generator = GenerationService::new(&config);
    let state = AppState::with_parts(store, generator);
    larder_core::api::routes().with_state(state)
}

/// Sign in a session user so inventory routes are reachable.
pub async fn sign_in(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({"email": "ada@example.com", "name": "Ada"}),
        ))
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);
    extract_json(response).await
}

/// Extract JSON body from response
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Create a GET request
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a POST request with JSON body
pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Create a PUT request with JSON body
pub fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Create a DELETE request
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
