//! Server-Sent Events (SSE) parser for Claude responses

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use crate::llm::core::error::LlmError;

use super::types::ClaudeStreamEvent;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Parse a stream of bytes as Claude SSE events
///
/// Claude's SSE format uses:
/// ```text
/// event: message_start
/// data: {"type":"message_start",...}
///
/// event: content_block_delta
/// data: {"type":"content_block_delta",...}
/// ```
///
/// Bytes are buffered until a blank line closes an event, so events (and
/// multi-byte UTF-8 sequences) may be split across network chunks. Whatever
/// is left in the buffer when the body ends is parsed as a final event.
pub fn parse_sse_stream(
    byte_stream: ByteStream,
) -> Pin<Box<dyn Stream<Item = Result<ClaudeStreamEvent, LlmError>> + Send>> {
    let mut buffer: Vec<u8> = Vec::new();

    // `None` marks the end of the body
    let chunks = byte_stream
        .map(Some)
        .chain(futures::stream::once(futures::future::ready(None)));

    let event_stream = chunks.flat_map(move |item| {
        let chunk = match item {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                return futures::stream::iter(vec![Err(LlmError::StreamError(e.to_string()))]);
            }
            None => {
                let rest = std::mem::take(&mut buffer);
                return futures::stream::iter(decode_event(&rest).into_iter().collect::<Vec<_>>());
            }
        };

        buffer.extend(chunk.iter().filter(|b| **b != b'\r'));

        let mut events = Vec::new();
        while let Some(event_end) = find_event_end(&buffer) {
            let raw: Vec<u8> = buffer.drain(..event_end + 2).collect();
            events.extend(decode_event(&raw[..event_end]));
        }

        futures::stream::iter(events)
    });

    Box::pin(event_stream)
}

fn decode_event(raw: &[u8]) -> Option<Result<ClaudeStreamEvent, LlmError>> {
    match std::str::from_utf8(raw) {
        Ok(event_text) => parse_event(event_text),
        Err(e) => Some(Err(LlmError::StreamError(format!(
            "Invalid UTF-8 in stream: {}",
            e
        )))),
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Parse a single SSE event from its text representation
fn parse_event(event_text: &str) -> Option<Result<ClaudeStreamEvent, LlmError>> {
    let mut event_type: Option<&str> = None;
    let mut data = String::new();

    for line in event_text.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            event_type = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(value.trim());
        }
    }

    if data.is_empty() {
        return None;
    }

    match serde_json::from_str::<ClaudeStreamEvent>(&data) {
        Ok(event) => Some(Ok(event)),
        Err(e) => Some(Err(LlmError::SerializationError(format!(
            "Failed to parse Claude SSE event (type: {:?}): {}. Data: {}",
            event_type, e, data
        )))),
    }
}
