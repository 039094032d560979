//! LLM Abstraction Layer
//!
//! A provider-neutral streaming interface plus a client for Anthropic Claude
//! models hosted on Google Cloud Platform's Vertex AI.

pub mod auth;
pub mod claude;
pub mod core;

pub use self::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::{generate_text, EventStream, Generation, LlmProvider},
    types::{
        ContentBlock, ContentBlockStart, ContentDelta, FinishReason, GenerateRequest, Message,
        MessageRole, StreamEvent, UsageMetadata,
    },
};
pub use auth::{AuthenticationManager, StaticToken, TokenSource};
pub use claude::{ClaudeClient, ClaudeModel};
