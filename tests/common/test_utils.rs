use super::mocks::MockGenerativeClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response},
};
use gemini_relay::{
    relay::{RelayHandler, RelaySettings},
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";
pub const RELAY_PATH: &str = "/api/gemini";

pub fn test_settings() -> RelaySettings {
    RelaySettings {
        api_key: Some(TEST_API_KEY.to_string()),
        development: false,
    }
}

/// Builds the relay router around a mock client
pub fn create_test_app(client: Arc<MockGenerativeClient>, settings: RelaySettings) -> Router {
    let state = AppState {
        relay: Arc::new(RelayHandler::new(settings, client)),
    };
    server::router(state, RELAY_PATH)
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_message(message: &str) -> Request<Body> {
    let body = serde_json::json!({ "message": message }).to_string();
    json_request(Method::POST, RELAY_PATH, &body)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

pub fn assert_cors_headers(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}
