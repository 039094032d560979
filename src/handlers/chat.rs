// POST /chat handler

use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;

use super::workflow_error_reply;
use crate::models::ChatRequest;
use crate::workflow::ChatWorkflow;

pub async fn chat_handler(
    request: ChatRequest,
    workflow: Arc<ChatWorkflow>,
) -> Result<impl warp::Reply, Infallible> {
    tracing::info!(
        thread_id = %request.thread_id,
        action = %request.action,
        "POST /chat"
    );

    match workflow.submit(request).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::OK,
        )),
        Err(err) => Ok(workflow_error_reply(&err)),
    }
}
