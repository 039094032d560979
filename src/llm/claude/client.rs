//! Claude client implementation

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::llm::auth::TokenSource;
use crate::llm::core::{
    error::LlmError,
    provider::{EventStream, LlmProvider},
    types::{GenerateRequest, UsageMetadata},
};

use super::mapper::{from_claude_event, to_claude_request};
use super::sse::parse_sse_stream;
use super::types::ClaudeErrorResponse;

/// Claude model identifiers for Vertex AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeModel {
    /// Claude Sonnet 4.5 (released 2025-09-29)
    Sonnet45,
    /// Claude Haiku 4.5 (released 2025-10-01)
    Haiku45,
}

impl ClaudeModel {
    /// Get the model identifier string for Vertex AI
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaudeModel::Sonnet45 => "claude-sonnet-4-5@20250929",
            ClaudeModel::Haiku45 => "claude-haiku-4-5@20251001",
        }
    }
}

impl FromStr for ClaudeModel {
    type Err = String;

    /// Accepts the short names `sonnet-4.5` / `haiku-4.5` or the full Vertex id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sonnet-4.5" | "sonnet45" | "claude-sonnet-4-5@20250929" => Ok(ClaudeModel::Sonnet45),
            "haiku-4.5" | "haiku45" | "claude-haiku-4-5@20251001" => Ok(ClaudeModel::Haiku45),
            other => Err(format!(
                "unknown model '{}', expected one of: sonnet-4.5, haiku-4.5",
                other
            )),
        }
    }
}

/// Client for interacting with Claude models on Vertex AI
pub struct ClaudeClient {
    http_client: Client,
    token_source: Arc<dyn TokenSource>,
    /// Scheme and host, e.g. `https://us-central1-aiplatform.googleapis.com`
    base_url: String,
    project_id: String,
    location: String,
    model: ClaudeModel,
}

impl ClaudeClient {
    /// Create a new Claude client against the regional Vertex AI endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        project_id: String,
        location: String,
        model: ClaudeModel,
        token_source: Arc<dyn TokenSource>,
    ) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        let base_url = format!("https://{}-aiplatform.googleapis.com", location);

        Ok(Self {
            http_client,
            token_source,
            base_url,
            project_id,
            location,
            model,
        })
    }

    /// Point the client at a different host (private endpoint, local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> ClaudeModel {
        self.model
    }

    /// Fetch a token once so that missing credentials surface at startup
    pub async fn verify_credentials(&self) -> Result<(), LlmError> {
        self.token_source.get_token().await.map(|_| ())
    }

    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/anthropic/models/{}:streamRawPredict",
            self.base_url,
            self.project_id,
            self.location,
            self.model.as_str()
        )
    }

    async fn make_streaming_request(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        let claude_request = to_claude_request(request);
        let token = self.token_source.get_token().await?;

        let url = self.build_endpoint_url();
        tracing::debug!(model = self.model.as_str(), "sending streamRawPredict request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&claude_request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(LlmError::RateLimitExceeded { retry_after });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ClaudeErrorResponse>(&body) {
                Ok(parsed) => LlmError::ProviderError {
                    code: parsed.error.error_type,
                    message: parsed.error.message,
                },
                Err(_) => LlmError::HttpError {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let sse_stream = parse_sse_stream(Box::pin(response.bytes_stream()));

        let mut accumulated_usage = UsageMetadata::default();
        let event_stream = sse_stream.filter_map(move |result| {
            let mapped = match result {
                Ok(claude_event) => from_claude_event(claude_event, &mut accumulated_usage).map(Ok),
                Err(e) => Some(Err(e)),
            };
            futures::future::ready(mapped)
        });

        Ok(Box::pin(event_stream))
    }
}

#[async_trait]
impl LlmProvider for ClaudeClient {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        self.make_streaming_request(request).await
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }
}
