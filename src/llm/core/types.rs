//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;

/// Request to generate content from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation sent to the model
    pub messages: Vec<Message>,
    pub config: GenerationConfig,
}

impl GenerateRequest {
    /// Build a request holding a single user prompt
    pub fn from_prompt(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            config,
        }
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content blocks in the message
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a new user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new assistant message with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Concatenated text of every text block
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect()
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model output
    Assistant,
}

/// Content block within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text { text: String },
}

/// Events emitted during streaming generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Response begins
    MessageStart { message: MessageMetadata },
    /// New content block begins
    ContentBlockStart {
        index: usize,
        #[serde(rename = "content_block")]
        block: ContentBlockStart,
    },
    /// Incremental content update
    ContentDelta { index: usize, delta: ContentDelta },
    /// Content block complete
    ContentBlockEnd { index: usize },
    /// Message metadata update
    MessageDelta { usage: Option<UsageMetadata> },
    /// Response complete
    MessageEnd {
        finish_reason: FinishReason,
        usage: UsageMetadata,
    },
    /// Error occurred
    Error { error: String },
}

/// Metadata about a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub id: String,
    pub role: MessageRole,
    /// Initial usage metadata (if available)
    pub usage: Option<UsageMetadata>,
}

/// Start of a content block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockStart {
    /// Text block starting
    Text { text: String },
    /// Any block kind this layer does not consume (tool use, thinking, ...)
    Other,
}

/// Incremental content update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentDelta {
    /// Text token(s)
    TextDelta { text: String },
    /// Delta for a non-text block, ignored by text collection
    Other,
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    EndTurn,
    /// Hit token limit
    MaxTokens,
    /// Hit stop sequence
    StopSequence,
    /// Blocked by safety filters
    Safety,
    /// Provider-specific reason
    Other(String),
}

impl FinishReason {
    /// Wire name of the reason
    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::EndTurn => "end_turn",
            FinishReason::MaxTokens => "max_tokens",
            FinishReason::StopSequence => "stop_sequence",
            FinishReason::Safety => "safety",
            FinishReason::Other(other) => other,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
    /// Sum of input and output
    pub total_tokens: u32,
}

impl UsageMetadata {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user_constructor() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content.len(), 1);
        assert_eq!(msg.text(), "Hello");
    }

    #[test]
    fn test_message_assistant_constructor() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.text(), "Hi there");
    }

    #[test]
    fn test_request_from_prompt() {
        let request = GenerateRequest::from_prompt("Explain this", GenerationConfig::new(500));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].text(), "Explain this");
        assert_eq!(request.config.max_tokens, 500);
    }

    #[test]
    fn test_usage_metadata_new() {
        let usage = UsageMetadata::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_content_block_serialization() {
        let block = ContentBlock::Text {
            text: "Hello".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"text\":\"Hello\""));
    }

    #[test]
    fn test_finish_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&FinishReason::EndTurn).unwrap(),
            "\"end_turn\""
        );
        assert_eq!(
            serde_json::to_string(&FinishReason::MaxTokens).unwrap(),
            "\"max_tokens\""
        );
        assert_eq!(FinishReason::Other("refusal".into()).as_str(), "refusal");
    }
}
