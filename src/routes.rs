// Route definitions

use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

use crate::handlers;
use crate::workflow::ChatWorkflow;

/// Largest accepted /chat body
const MAX_BODY_BYTES: u64 = 256 * 1024;

/// Request headers accepted on cross-origin calls
const ALLOWED_HEADERS: [&str; 12] = [
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-language",
    "content-type",
    "origin",
    "pragma",
    "referer",
    "user-agent",
    "x-csrf-token",
    "x-requested-with",
];

pub fn configure_routes(
    workflow: Arc<ChatWorkflow>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_workflow(workflow.clone()))
        .and_then(handlers::chat_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // GET /threads/{threadId}/memory, segment still percent-encoded
    let thread_info = warp::path!("threads" / String / "memory")
        .and(warp::get())
        .and(with_workflow(workflow))
        .and_then(handlers::thread_info_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(ALLOWED_HEADERS.to_vec());

    chat.or(health)
        .or(thread_info)
        .recover(handlers::handle_rejection)
        .with(cors)
}

fn with_workflow(
    workflow: Arc<ChatWorkflow>,
) -> impl Filter<Extract = (Arc<ChatWorkflow>,), Error = Infallible> + Clone {
    warp::any().map(move || workflow.clone())
}
