//! Application Default Credentials (ADC) wrapper

use async_trait::async_trait;
use gcp_auth::AuthenticationManager as GcpAuthManager;

use super::TokenSource;
use crate::llm::core::error::LlmError;

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Manages GCP authentication tokens using Application Default Credentials
///
/// Supports multiple credential sources:
/// - `GOOGLE_APPLICATION_CREDENTIALS` environment variable
/// - User credentials from `gcloud auth application-default login`
/// - Metadata server (Compute Engine, Cloud Run, GKE)
pub struct AuthenticationManager {
    inner: GcpAuthManager,
}

impl AuthenticationManager {
    /// Discover credentials using the standard ADC flow.
    ///
    /// # Errors
    /// Returns an error if no valid credentials can be found.
    pub async fn new() -> Result<Self, LlmError> {
        let inner = GcpAuthManager::new().await.map_err(|e| {
            LlmError::AuthenticationError(format!("Failed to initialize ADC: {}", e))
        })?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl TokenSource for AuthenticationManager {
    /// The token is cached by `gcp_auth` and refreshed when expired.
    async fn get_token(&self) -> Result<String, LlmError> {
        let token = self
            .inner
            .get_token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| LlmError::AuthenticationError(format!("Failed to get token: {}", e)))?;

        Ok(token.as_str().to_string())
    }
}
