use super::types::*;
use crate::{Result, config::GeminiConfig};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Issues one `generateContent` call. Returns `Err` only when the call
    /// did not complete; any HTTP status is an `Ok` response.
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<UpstreamResponse>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<UpstreamResponse> {
        debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        debug!(
            "Received generateContent response with status {} ({} bytes)",
            status,
            body.len()
        );

        Ok(UpstreamResponse { status, body })
    }
}
