// Turns warp rejections into JSON error bodies

use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType};
use warp::Rejection;

use super::error_reply;

pub async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected an application/json body".to_string(),
        )
    } else if err.find::<PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(error_reply(status, detail))
}
