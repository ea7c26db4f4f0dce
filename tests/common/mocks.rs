use async_trait::async_trait;
use axum::http::StatusCode;
use gemini_relay::{
    Error, Result,
    gemini::{GenerateContentRequest, GenerativeClient, UpstreamResponse},
};
use std::sync::{Arc, Mutex};

/// A call the relay made to the mock client.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub request: GenerateContentRequest,
}

/// Mock Gemini client that answers every call with the same scripted reply
#[derive(Debug)]
pub struct MockGenerativeClient {
    pub reply: std::result::Result<UpstreamResponse, String>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self::with_response(
            StatusCode::OK,
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}],"role":"model"}}]}"#,
        )
    }

    pub fn with_response(status: StatusCode, body: &str) -> Self {
        Self {
            reply: Ok(UpstreamResponse {
                status,
                body: body.to_string(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            request: request.clone(),
        });

        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Error::internal(message.clone())),
        }
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}
