//! Provider trait for LLM implementations

use async_trait::async_trait;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use super::{
    error::LlmError,
    types::{ContentBlockStart, ContentDelta, FinishReason, GenerateRequest, StreamEvent, UsageMetadata},
};

/// Boxed stream of provider events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Stream generate content from the LLM
    ///
    /// This method sends a request to the LLM and returns a stream of events
    /// representing the incremental response.
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError>;

    /// Model identifier reported in response metadata
    fn model_id(&self) -> &str;
}

/// Fully collected model output
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub finish_reason: Option<FinishReason>,
    pub usage: UsageMetadata,
}

/// Run a request to completion and collect the generated text
///
/// Text from block starts and text deltas is concatenated in arrival order.
/// An `Error` event aborts collection, and a stream that produced no text
/// at all is reported as [`LlmError::EmptyResponse`].
pub async fn generate_text(
    provider: &dyn LlmProvider,
    request: GenerateRequest,
) -> Result<Generation, LlmError> {
    let mut stream = provider.stream_generate(request).await?;

    let mut text = String::new();
    let mut finish_reason = None;
    let mut usage = UsageMetadata::default();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::ContentBlockStart {
                block: ContentBlockStart::Text { text: t },
                ..
            } => text.push_str(&t),
            StreamEvent::ContentDelta {
                delta: ContentDelta::TextDelta { text: t },
                ..
            } => text.push_str(&t),
            StreamEvent::MessageDelta { usage: Some(u) } => usage = u,
            StreamEvent::MessageEnd {
                finish_reason: reason,
                usage: u,
            } => {
                finish_reason = Some(reason);
                usage = u;
                break;
            }
            StreamEvent::Error { error } => {
                return Err(LlmError::ProviderError {
                    code: "stream_error".to_string(),
                    message: error,
                });
            }
            _ => {}
        }
    }

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    Ok(Generation {
        text,
        finish_reason,
        usage,
    })
}
