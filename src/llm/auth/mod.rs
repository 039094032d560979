//! Bearer-token sources for Vertex AI requests

pub mod adc;

use async_trait::async_trait;

use crate::llm::core::error::LlmError;

pub use adc::AuthenticationManager;

/// Anything that can hand out an OAuth access token for the cloud-platform scope
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn get_token(&self) -> Result<String, LlmError>;
}

/// A fixed token, e.g. the output of `gcloud auth print-access-token`
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn get_token(&self) -> Result<String, LlmError> {
        if self.0.trim().is_empty() {
            return Err(LlmError::AuthenticationError(
                "Static access token is empty".to_string(),
            ));
        }
        Ok(self.0.clone())
    }
}
