// Handlers module

pub mod chat;
pub mod health;
pub mod rejection;
pub mod thread_info;

pub use chat::chat_handler;
pub use health::health_handler;
pub use rejection::handle_rejection;
pub use thread_info::thread_info_handler;

use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::models::ErrorResponse;
use crate::workflow::WorkflowError;

/// JSON `{"detail": ...}` reply with the given status
pub fn error_reply(status: StatusCode, detail: impl Into<String>) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(&ErrorResponse::new(detail)), status)
}

pub(crate) fn workflow_error_reply(err: &WorkflowError) -> WithStatus<Json> {
    match err {
        WorkflowError::InvalidRequest(reason) => error_reply(StatusCode::BAD_REQUEST, reason.clone()),
        WorkflowError::ThreadNotFound => error_reply(StatusCode::NOT_FOUND, "Thread not found"),
        WorkflowError::Timeout(_) => error_reply(
            StatusCode::GATEWAY_TIMEOUT,
            format!("Error processing request: {}", err),
        ),
        WorkflowError::Cancelled => error_reply(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Error processing request: {}", err),
        ),
        WorkflowError::Llm(_) => error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing request: {}", err),
        ),
    }
}
