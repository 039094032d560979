//! Chat turn execution
//!
//! A turn resolves the handler input, serializes on the thread's turn lock,
//! formats the prompt from recent history, calls the model under a timeout and
//! records the exchange. Nothing is recorded when the model call fails.

mod error;
pub mod prompts;
pub mod router;

pub use error::WorkflowError;

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::conversation::{ConversationStore, Exchange};
use crate::llm::{generate_text, GenerateRequest, Generation, GenerationConfig, LlmProvider};
use crate::models::{Action, ChatRequest, ChatResponse, ThreadInfo};
use prompts::format_history;

/// Tunables for a chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    /// Number of most recent exchanges included in prompts
    pub history_window: usize,
    pub llm_timeout: Duration,
    pub generation: GenerationConfig,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            history_window: 6,
            llm_timeout: Duration::from_secs(60),
            generation: GenerationConfig::default(),
        }
    }
}

pub struct ChatWorkflow {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn ConversationStore>,
    settings: WorkflowSettings,
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    shutdown: CancellationToken,
}

impl ChatWorkflow {
    pub fn new(provider: Arc<dyn LlmProvider>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            provider,
            store,
            settings: WorkflowSettings::default(),
            turn_locks: Mutex::new(HashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// In-flight model calls abort with [`WorkflowError::Cancelled`] once
    /// this token is cancelled
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Run one chat turn
    pub async fn submit(&self, request: ChatRequest) -> Result<ChatResponse, WorkflowError> {
        let ChatRequest {
            action,
            thread_id,
            code,
            message,
        } = request;

        let input = resolve_input(action, code, message)?;
        let handler = router::route(action);

        let turn_lock = self.turn_lock(&thread_id).await;
        let _turn = turn_lock.lock().await;

        let thread = self.store.get_or_create(&thread_id).await;
        if action.takes_code() {
            self.store.set_last_code(&thread_id, input.clone()).await;
        }

        let history = format_history(thread.recent(self.settings.history_window));
        let prompt = handler.build_prompt(&history, &input);

        let started = Instant::now();
        let generation = match self.generate(prompt).await {
            Ok(generation) => generation,
            Err(e) => {
                warn!(thread_id = %thread_id, %action, error = %e, "chat turn failed");
                return Err(e);
            }
        };

        self.store
            .append(
                &thread_id,
                Exchange::new(handler.input_summary(&input), generation.text.clone()),
            )
            .await;
        let threads = self.store.thread_count().await;

        info!(
            thread_id = %thread_id,
            %action,
            history_len = thread.exchanges.len() + 1,
            threads,
            output_tokens = generation.usage.output_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat turn completed"
        );

        let metadata = self.metadata(&generation);
        Ok(ChatResponse {
            response: generation.text,
            action,
            thread_id,
            metadata: Some(metadata),
        })
    }

    /// Message count and last submitted code of a known thread
    pub async fn thread_info(&self, thread_id: &str) -> Result<ThreadInfo, WorkflowError> {
        let thread = self
            .store
            .get(thread_id)
            .await
            .ok_or(WorkflowError::ThreadNotFound)?;

        Ok(ThreadInfo {
            thread_id: thread_id.to_string(),
            message_count: thread.exchanges.len(),
            last_code: thread.last_code,
        })
    }

    async fn turn_lock(&self, thread_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks.entry(thread_id.to_string()).or_default().clone()
    }

    async fn generate(&self, prompt: String) -> Result<Generation, WorkflowError> {
        let request = GenerateRequest::from_prompt(prompt, self.settings.generation.clone());
        let timeout = self.settings.llm_timeout;

        tokio::select! {
            _ = self.shutdown.cancelled() => Err(WorkflowError::Cancelled),
            result = tokio::time::timeout(timeout, generate_text(self.provider.as_ref(), request)) => {
                match result {
                    Ok(generation) => Ok(generation?),
                    Err(_) => Err(WorkflowError::Timeout(timeout)),
                }
            }
        }
    }

    fn metadata(&self, generation: &Generation) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("model".to_string(), json!(self.provider.model_id()));
        if let Some(reason) = &generation.finish_reason {
            metadata.insert("finish_reason".to_string(), json!(reason.as_str()));
        }
        metadata.insert("input_tokens".to_string(), json!(generation.usage.input_tokens));
        metadata.insert("output_tokens".to_string(), json!(generation.usage.output_tokens));
        metadata
    }
}

/// Pick the code or message the action works on; blank counts as missing
fn resolve_input(
    action: Action,
    code: Option<String>,
    message: Option<String>,
) -> Result<String, WorkflowError> {
    let (field, value) = if action.takes_code() {
        ("code", code)
    } else {
        ("message", message)
    };

    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            WorkflowError::InvalidRequest(format!("{} action requires a non-empty '{}'", action, field))
        })
}
