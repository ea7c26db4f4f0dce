use crate::relay::RelayHandler;
use axum::{body::Bytes, extract::State, http::Method, response::Response};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayHandler>,
}

/// Accepts every method so that non-POST requests reach the relay's own
/// 405 response instead of axum's.
pub async fn relay(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    state.relay.handle(&method, &body).await
}
