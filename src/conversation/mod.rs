//! Per-thread conversation history
//!
//! Handlers only see the [`ConversationStore`] trait, so the in-memory map can
//! be swapped for a persistent backend without touching the workflow.

mod in_memory;

pub use in_memory::InMemoryStore;

use async_trait::async_trait;

/// One recorded (input, output) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub input: String,
    pub output: String,
}

impl Exchange {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Snapshot of a conversation thread
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    /// Exchanges in arrival order
    pub exchanges: Vec<Exchange>,
    pub last_code: Option<String>,
}

impl Thread {
    /// The most recent `window` exchanges, oldest first
    pub fn recent(&self, window: usize) -> &[Exchange] {
        let start = self.exchanges.len().saturating_sub(window);
        &self.exchanges[start..]
    }
}

/// Storage for conversation threads keyed by caller-supplied id
///
/// Threads are created on first reference and never removed.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Snapshot of the thread, creating an empty one if unknown
    async fn get_or_create(&self, thread_id: &str) -> Thread;

    /// Snapshot of the thread if it has been seen
    async fn get(&self, thread_id: &str) -> Option<Thread>;

    /// Append an exchange to the end of the thread's history
    async fn append(&self, thread_id: &str, exchange: Exchange);

    async fn set_last_code(&self, thread_id: &str, code: String);

    async fn thread_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread_with(n: usize) -> Thread {
        Thread {
            exchanges: (0..n)
                .map(|i| Exchange::new(format!("q{}", i), format!("a{}", i)))
                .collect(),
            last_code: None,
        }
    }

    #[test]
    fn test_recent_returns_everything_when_short() {
        let thread = thread_with(3);
        assert_eq!(thread.recent(6).len(), 3);
        assert_eq!(thread.recent(6)[0].input, "q0");
    }

    #[test]
    fn test_recent_keeps_latest_window_in_order() {
        let thread = thread_with(10);
        let recent = thread.recent(6);
        let inputs: Vec<&str> = recent.iter().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["q4", "q5", "q6", "q7", "q8", "q9"]);
    }

    #[test]
    fn test_recent_with_zero_window() {
        assert!(thread_with(4).recent(0).is_empty());
    }
}
