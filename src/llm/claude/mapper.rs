//! Mapping between abstraction types and Claude-specific types

use crate::llm::core::types::{
    ContentBlockStart, ContentDelta, FinishReason, GenerateRequest, Message, MessageMetadata,
    MessageRole, StreamEvent, UsageMetadata,
};

use super::types::{
    ClaudeContentBlockStart, ClaudeContentDelta, ClaudeMessage, ClaudeStreamEvent,
    StreamRawPredictRequest,
};

pub const ANTHROPIC_VERSION: &str = "vertex-2023-10-16";

/// Convert our abstraction request to Claude's request format
pub fn to_claude_request(request: GenerateRequest) -> StreamRawPredictRequest {
    StreamRawPredictRequest {
        anthropic_version: ANTHROPIC_VERSION.to_string(),
        max_tokens: request.config.max_tokens,
        messages: request.messages.into_iter().map(to_claude_message).collect(),
        temperature: request.config.temperature,
        stream: true,
    }
}

fn to_claude_message(message: Message) -> ClaudeMessage {
    let role = match message.role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };

    ClaudeMessage {
        role: role.to_string(),
        content: message.text(),
    }
}

fn to_finish_reason(stop_reason: &str) -> FinishReason {
    match stop_reason {
        "end_turn" => FinishReason::EndTurn,
        "max_tokens" => FinishReason::MaxTokens,
        "stop_sequence" => FinishReason::StopSequence,
        "refusal" => FinishReason::Safety,
        other => FinishReason::Other(other.to_string()),
    }
}

/// Convert Claude's stream event to our abstraction's StreamEvent
///
/// `accumulated_usage` carries input tokens from `message_start` forward,
/// since `message_delta` only reports output tokens.
pub fn from_claude_event(
    event: ClaudeStreamEvent,
    accumulated_usage: &mut UsageMetadata,
) -> Option<StreamEvent> {
    match event {
        ClaudeStreamEvent::MessageStart { message } => {
            *accumulated_usage =
                UsageMetadata::new(message.usage.input_tokens, message.usage.output_tokens);

            Some(StreamEvent::MessageStart {
                message: MessageMetadata {
                    id: message.id,
                    role: MessageRole::Assistant,
                    usage: Some(*accumulated_usage),
                },
            })
        }
        ClaudeStreamEvent::ContentBlockStart {
            index,
            content_block,
        } => {
            let block = match content_block {
                ClaudeContentBlockStart::Text { text } => ContentBlockStart::Text { text },
                ClaudeContentBlockStart::Other => ContentBlockStart::Other,
            };
            Some(StreamEvent::ContentBlockStart { index, block })
        }
        ClaudeStreamEvent::ContentBlockDelta { index, delta } => {
            let delta = match delta {
                ClaudeContentDelta::TextDelta { text } => ContentDelta::TextDelta { text },
                ClaudeContentDelta::Other => ContentDelta::Other,
            };
            Some(StreamEvent::ContentDelta { index, delta })
        }
        ClaudeStreamEvent::ContentBlockStop { index } => {
            Some(StreamEvent::ContentBlockEnd { index })
        }
        ClaudeStreamEvent::MessageDelta { delta, usage } => {
            if let Some(usage) = usage {
                *accumulated_usage =
                    UsageMetadata::new(accumulated_usage.input_tokens, usage.output_tokens);
            }

            match delta.stop_reason {
                Some(stop_reason) => Some(StreamEvent::MessageEnd {
                    finish_reason: to_finish_reason(&stop_reason),
                    usage: *accumulated_usage,
                }),
                None => Some(StreamEvent::MessageDelta {
                    usage: Some(*accumulated_usage),
                }),
            }
        }
        // message_stop follows the message_delta carrying stop_reason
        ClaudeStreamEvent::MessageStop | ClaudeStreamEvent::Ping => None,
        ClaudeStreamEvent::Error { error } => Some(StreamEvent::Error {
            error: format!("{}: {}", error.error_type, error.message),
        }),
    }
}
