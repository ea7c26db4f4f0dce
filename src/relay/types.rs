use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct InboundRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Raw(String),
}

#[derive(Debug)]
pub enum RelayError {
    MethodNotAllowed { method: String },
    MissingCredential,
    InvalidRequest { details: Option<String> },
    Upstream { status: StatusCode, body: UpstreamBody },
    TransportFailure {
        message: String,
        stack: Option<Vec<String>>,
    },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::TransportFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::MethodNotAllowed { method } => ErrorResponse {
                error: "Method not allowed".to_string(),
                details: Some(format!("Method {} is not allowed", method)),
                ..Default::default()
            },
            Self::MissingCredential => ErrorResponse {
                error: "Server configuration error".to_string(),
                details: Some("GEMINI_API_KEY is not set".to_string()),
                ..Default::default()
            },
            Self::InvalidRequest { details } => ErrorResponse {
                error: "Message is required".to_string(),
                details,
                ..Default::default()
            },
            Self::Upstream {
                body: UpstreamBody::Json(value),
                ..
            } => return (status, Json(value)).into_response(),
            Self::Upstream {
                body: UpstreamBody::Raw(text),
                ..
            } => ErrorResponse {
                error: "Upstream API error".to_string(),
                details: Some(text),
                status: Some(status.as_u16()),
                ..Default::default()
            },
            Self::TransportFailure { message, stack } => ErrorResponse {
                error: "Internal server error".to_string(),
                message: Some(message),
                stack,
                ..Default::default()
            },
        };

        (status, Json(body)).into_response()
    }
}

pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}
