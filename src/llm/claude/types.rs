//! Claude-specific request and response types
//!
//! These types map directly to the Vertex AI Claude API schema.

use serde::{Deserialize, Serialize};

/// Request to stream raw predictions from Claude via Vertex AI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRawPredictRequest {
    /// Required API version for Vertex AI Claude
    pub anthropic_version: String,
    /// Maximum number of tokens to generate (required)
    pub max_tokens: u32,
    pub messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Always true for streaming
    pub stream: bool,
}

/// A single message in the Claude conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessage {
    /// Role: "user" or "assistant"
    pub role: String,
    pub content: String,
}

/// SSE event types from Claude streaming API
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeStreamEvent {
    /// Message streaming started
    MessageStart { message: ClaudeMessageData },
    /// Content block started
    ContentBlockStart {
        index: usize,
        content_block: ClaudeContentBlockStart,
    },
    /// Content block delta (incremental update)
    ContentBlockDelta {
        index: usize,
        delta: ClaudeContentDelta,
    },
    /// Content block stopped
    ContentBlockStop { index: usize },
    /// Message delta (metadata update)
    MessageDelta {
        delta: ClaudeMessageDeltaData,
        usage: Option<ClaudeUsage>,
    },
    /// Message streaming stopped
    MessageStop,
    /// Ping event (keep-alive)
    Ping,
    /// Error event
    Error { error: ClaudeErrorData },
}

/// Message data from message_start event
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeMessageData {
    pub id: String,
    /// Message role (always "assistant" for responses)
    pub role: String,
    pub model: String,
    /// Initial usage metadata
    pub usage: ClaudeUsage,
}

/// Content block start data
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentBlockStart {
    Text { text: String },
    /// tool_use, thinking and other block kinds
    #[serde(other)]
    Other,
}

/// Content delta (incremental update)
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentDelta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

/// Message delta data
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeMessageDeltaData {
    /// Stop reason (set when message completes)
    pub stop_reason: Option<String>,
}

/// Usage metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeUsage {
    /// Input tokens consumed (not present in message_delta updates)
    #[serde(default)]
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeErrorData {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Non-streaming error body returned with a failing HTTP status
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeErrorResponse {
    pub error: ClaudeErrorData,
}
