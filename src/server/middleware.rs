//! Request logging and panic recovery.

use std::any::Any;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};
use tracing::info;

use crate::error::ApiError;

/// Log every request on arrival and on completion.
///
/// The subscriber stamps each event with its timestamp.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    info!(method = %method, uri = %uri, "Request received");

    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

/// Turn a handler panic into a masked `500 Internal Server Error`.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
