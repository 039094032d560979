//! Prompt templates for each action

use crate::conversation::Exchange;
use crate::models::Action;

pub const NO_HISTORY: &str = "No previous conversation.";

/// Builds the single instruction sent to the model for one action
pub trait PromptHandler: Send + Sync {
    fn action(&self) -> Action;

    /// Text recorded as the exchange input
    fn input_summary(&self, input: &str) -> String;

    fn build_prompt(&self, history: &str, input: &str) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct ExplainHandler;

#[derive(Debug, Clone, Copy)]
pub struct DebugHandler;

#[derive(Debug, Clone, Copy)]
pub struct GeneralHandler;

impl PromptHandler for ExplainHandler {
    fn action(&self) -> Action {
        Action::Explain
    }

    fn input_summary(&self, input: &str) -> String {
        format!("Explain: {}", input)
    }

    fn build_prompt(&self, history: &str, code: &str) -> String {
        format!(
            "You are a Python programming tutor. Explain the following Python code clearly and concisely.

Previous conversation context:
{history}

Code to explain:
{code}

Provide a clear, educational explanation in 3-6 sentences. Focus on what the code does, how it works, and key concepts. Use markdown formatting for any code snippets with ```python blocks."
        )
    }
}

impl PromptHandler for DebugHandler {
    fn action(&self) -> Action {
        Action::Debug
    }

    fn input_summary(&self, input: &str) -> String {
        format!("Debug: {}", input)
    }

    fn build_prompt(&self, history: &str, code: &str) -> String {
        format!(
            "You are a Python debugging expert. Analyze the following Python code for errors and issues.

Previous conversation context:
{history}

Code to debug:
{code}

Identify any syntax errors, logic issues, or potential problems. Provide clear explanations and suggest fixes in 4-8 sentences. Include corrected code examples using ```python markdown blocks when helpful."
        )
    }
}

impl PromptHandler for GeneralHandler {
    fn action(&self) -> Action {
        Action::General
    }

    fn input_summary(&self, input: &str) -> String {
        input.to_string()
    }

    fn build_prompt(&self, history: &str, message: &str) -> String {
        format!(
            "You are a friendly Python programming assistant. Respond naturally to the user's message.

Previous conversation context:
{history}

User message:
{message}

Guidelines:
- If it's a greeting (hi, hello, etc.), introduce yourself warmly as a Python programming assistant
- For general questions about programming concepts, provide clear explanations
- For specific coding questions, include ```python examples when helpful
- For casual conversation, respond naturally and conversationally
- Keep responses helpful and encouraging

Provide a natural, conversational response in 2-5 sentences."
        )
    }
}

/// Render recent exchanges as alternating `User:` / `Assistant:` lines
pub fn format_history(exchanges: &[Exchange]) -> String {
    if exchanges.is_empty() {
        return NO_HISTORY.to_string();
    }

    exchanges
        .iter()
        .flat_map(|e| [format!("User: {}", e.input), format!("Assistant: {}", e.output)])
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Thread;

    #[test]
    fn test_empty_history_placeholder() {
        assert_eq!(format_history(&[]), "No previous conversation.");
    }

    #[test]
    fn test_history_alternates_roles() {
        let exchanges = vec![
            Exchange::new("hi", "Hello! I'm a Python assistant."),
            Exchange::new("Explain: x = 1", "Assigns 1 to x."),
        ];
        assert_eq!(
            format_history(&exchanges),
            "User: hi\nAssistant: Hello! I'm a Python assistant.\nUser: Explain: x = 1\nAssistant: Assigns 1 to x."
        );
    }

    #[test]
    fn test_history_window_keeps_latest_six() {
        let thread = Thread {
            exchanges: (1..=9)
                .map(|i| Exchange::new(format!("q{}", i), format!("a{}", i)))
                .collect(),
            last_code: None,
        };

        let history = format_history(thread.recent(6));
        let lines: Vec<&str> = history.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "User: q4");
        assert_eq!(lines[11], "Assistant: a9");
        assert!(!history.contains("q3"));
    }

    #[test]
    fn test_explain_prompt_embeds_code_and_history() {
        let prompt = ExplainHandler.build_prompt(NO_HISTORY, "def f(): return 1");
        assert!(prompt.starts_with("You are a Python programming tutor."));
        assert!(prompt.contains("Previous conversation context:\nNo previous conversation."));
        assert!(prompt.contains("Code to explain:\ndef f(): return 1"));
        assert!(prompt.contains("3-6 sentences"));
    }

    #[test]
    fn test_debug_prompt() {
        let prompt = DebugHandler.build_prompt("User: hi\nAssistant: hello", "x=1");
        assert!(prompt.starts_with("You are a Python debugging expert."));
        assert!(prompt.contains("User: hi\nAssistant: hello"));
        assert!(prompt.contains("Code to debug:\nx=1"));
        assert!(prompt.contains("4-8 sentences"));
    }

    #[test]
    fn test_general_prompt() {
        let prompt = GeneralHandler.build_prompt(NO_HISTORY, "What are decorators?");
        assert!(prompt.contains("User message:\nWhat are decorators?"));
        assert!(prompt.contains("2-5 sentences"));
    }

    #[test]
    fn test_input_summaries() {
        assert_eq!(ExplainHandler.input_summary("x=1"), "Explain: x=1");
        assert_eq!(DebugHandler.input_summary("x=1"), "Debug: x=1");
        assert_eq!(GeneralHandler.input_summary("hi"), "hi");
    }
}
