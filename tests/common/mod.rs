#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pyassist::conversation::InMemoryStore;
use pyassist::llm::{
    ContentDelta, EventStream, FinishReason, GenerateRequest, LlmError, LlmProvider, StreamEvent,
    UsageMetadata,
};
use pyassist::workflow::ChatWorkflow;

/// Provider that answers every prompt with a numbered reply and records prompts
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before answering so concurrent turns get a chance to interleave
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        let prompt = request.messages[0].text();
        let reply = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt);
            format!("reply {}", prompts.len())
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let events = vec![
            StreamEvent::ContentDelta {
                index: 0,
                delta: ContentDelta::TextDelta { text: reply },
            },
            StreamEvent::MessageEnd {
                finish_reason: FinishReason::EndTurn,
                usage: UsageMetadata::new(40, 8),
            },
        ];
        Ok(Box::pin(futures::stream::iter(events.into_iter().map(Ok))))
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }
}

/// Provider whose every call fails
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn stream_generate(&self, _request: GenerateRequest) -> Result<EventStream, LlmError> {
        Err(LlmError::HttpError {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }

    fn model_id(&self) -> &str {
        "failing-model"
    }
}

/// Provider that never produces an event
pub struct StallingProvider;

#[async_trait]
impl LlmProvider for StallingProvider {
    async fn stream_generate(&self, _request: GenerateRequest) -> Result<EventStream, LlmError> {
        Ok(Box::pin(futures::stream::pending()))
    }

    fn model_id(&self) -> &str {
        "stalling-model"
    }
}

pub fn workflow_with(provider: Arc<dyn LlmProvider>) -> ChatWorkflow {
    ChatWorkflow::new(provider, Arc::new(InMemoryStore::new()))
}
