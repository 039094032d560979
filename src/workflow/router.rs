//! Action → handler dispatch

use super::prompts::{DebugHandler, ExplainHandler, GeneralHandler, PromptHandler};
use crate::models::Action;

static EXPLAIN: ExplainHandler = ExplainHandler;
static DEBUG: DebugHandler = DebugHandler;
static GENERAL: GeneralHandler = GeneralHandler;

/// Select the handler for an action
pub fn route(action: Action) -> &'static dyn PromptHandler {
    match action {
        Action::Explain => &EXPLAIN,
        Action::Debug => &DEBUG,
        Action::General => &GENERAL,
    }
}
