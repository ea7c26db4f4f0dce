use super::types::{InboundRequest, RelayError, UpstreamBody, cors_headers};
use crate::gemini::{GenerateContentRequest, GenerativeClient};
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    pub api_key: Option<String>,
    pub development: bool,
}

pub struct RelayHandler {
    settings: RelaySettings,
    client: Arc<dyn GenerativeClient>,
}

impl RelayHandler {
    pub fn new(settings: RelaySettings, client: Arc<dyn GenerativeClient>) -> Self {
        Self { settings, client }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    pub async fn handle(&self, method: &Method, body: &[u8]) -> Response {
        let span = info_span!("relay", request_id = %Uuid::new_v4(), method = %method);

        let mut response = match self.dispatch(method, body).instrument(span).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
        response.headers_mut().extend(cors_headers());
        response
    }

    async fn dispatch(&self, method: &Method, body: &[u8]) -> Result<Response, RelayError> {
        if *method == Method::OPTIONS {
            return Ok(StatusCode::OK.into_response());
        }

        if *method != Method::POST {
            warn!("Rejecting {} request", method);
            return Err(RelayError::MethodNotAllowed {
                method: method.to_string(),
            });
        }

        let api_key = self.api_key().ok_or_else(|| {
            error!("GEMINI_API_KEY is not configured");
            RelayError::MissingCredential
        })?;

        let message = parse_message(body)?;
        info!("Relaying message ({} chars)", message.chars().count());

        let payload = GenerateContentRequest::from_message(message);
        let upstream = self
            .client
            .generate_content(api_key, &payload)
            .await
            .map_err(|e| {
                error!("Upstream call failed: {}", e);
                self.transport_failure(e.to_string(), e.chain())
            })?;

        if !upstream.status.is_success() {
            warn!("Upstream returned {}: {}", upstream.status, upstream.body);
            let body = match serde_json::from_str::<Value>(&upstream.body) {
                Ok(value) => UpstreamBody::Json(value),
                Err(_) => UpstreamBody::Raw(upstream.body),
            };
            return Err(RelayError::Upstream {
                status: upstream.status,
                body,
            });
        }

        let data: Value = serde_json::from_str(&upstream.body).map_err(|e| {
            error!("Upstream returned a non-JSON success body: {}", e);
            self.transport_failure(
                format!("Failed to parse upstream response: {}", e),
                vec![e.to_string()],
            )
        })?;

        debug!("Upstream response: {}", data);
        info!("Relayed upstream response");

        Ok((StatusCode::OK, Json(data)).into_response())
    }

    fn api_key(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    fn transport_failure(&self, message: String, stack: Vec<String>) -> RelayError {
        RelayError::TransportFailure {
            message,
            stack: self.settings.development.then_some(stack),
        }
    }
}

// An empty body reads as `{}`.
fn parse_message(body: &[u8]) -> Result<String, RelayError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        InboundRequest::default()
    } else {
        serde_json::from_slice::<InboundRequest>(body).map_err(|e| {
            warn!("Invalid request body: {}", e);
            RelayError::InvalidRequest {
                details: Some(format!("Invalid request body: {}", e)),
            }
        })?
    };

    match request.message {
        Some(message) if !message.is_empty() => Ok(message),
        _ => {
            warn!("Request is missing a message");
            Err(RelayError::InvalidRequest { details: None })
        }
    }
}
