use std::time::Duration;
use thiserror::Error;

use crate::llm::LlmError;

/// Failures of a chat turn or a thread lookup
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Thread not found")]
    ThreadNotFound,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Model did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Request cancelled because the server is shutting down")]
    Cancelled,
}
