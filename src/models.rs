// Request/response types for the HTTP API

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// What the caller wants done with the submitted code or message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Explain,
    Debug,
    General,
}

impl Action {
    /// Map a wire tag to an action.
    ///
    /// Only the exact upper-case tags select EXPLAIN or DEBUG; anything else,
    /// including `"explain"` or `"Debug"`, is treated as GENERAL.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "EXPLAIN" => Action::Explain,
            "DEBUG" => Action::Debug,
            _ => Action::General,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Action::Explain => "EXPLAIN",
            Action::Debug => "DEBUG",
            Action::General => "GENERAL",
        }
    }

    /// Whether this action works on submitted code rather than a message
    pub fn takes_code(&self) -> bool {
        matches!(self, Action::Explain | Action::Debug)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Action::from_tag(&tag))
    }
}

// POST /chat body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub action: Action,
    pub thread_id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn explain(thread_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            action: Action::Explain,
            thread_id: thread_id.into(),
            code: Some(code.into()),
            message: None,
        }
    }

    pub fn debug(thread_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            action: Action::Debug,
            thread_id: thread_id.into(),
            code: Some(code.into()),
            message: None,
        }
    }

    pub fn general(thread_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action: Action::General,
            thread_id: thread_id.into(),
            code: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub action: Action,
    pub thread_id: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Python AI Assistant API is running".to_string(),
        }
    }
}

// GET /threads/{thread_id}/memory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadInfo {
    pub thread_id: String,
    pub message_count: usize,
    pub last_code: Option<String>,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
