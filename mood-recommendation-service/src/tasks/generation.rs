use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use super::extract::RawModelOutput;
use crate::error::GenerationError;
use crate::models::GenerationRequest;

/// A text-generation backend.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawModelOutput, GenerationError>;
}

/// Client for the OpenAI Responses endpoint (`POST {base}/responses`).
pub struct OpenAiResponsesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiResponsesClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationClient for OpenAiResponsesClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawModelOutput, GenerationError> {
        info!(model = %request.model, "Calling generation API");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the provider's own message; fall back to the raw body.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), "Generation API error: {}", message);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(RawModelOutput::from_value(value))
    }
}
