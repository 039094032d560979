// GET /threads/{thread_id}/memory handler

use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;

use super::{error_reply, workflow_error_reply};
use crate::workflow::ChatWorkflow;

pub async fn thread_info_handler(
    raw_thread_id: String,
    workflow: Arc<ChatWorkflow>,
) -> Result<impl warp::Reply, Infallible> {
    // Ids are opaque, so `my%20thread` must find the thread posted as "my thread"
    let thread_id = match urlencoding::decode(&raw_thread_id) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                format!("Invalid thread id: {}", e),
            ))
        }
    };
    tracing::debug!(thread_id = %thread_id, "GET /threads/memory");

    match workflow.thread_info(&thread_id).await {
        Ok(info) => Ok(warp::reply::with_status(
            warp::reply::json(&info),
            StatusCode::OK,
        )),
        Err(err) => Ok(workflow_error_reply(&err)),
    }
}
