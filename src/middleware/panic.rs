use std::any::Any;

use axum::{http::StatusCode, response::Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ErrorBody;

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_json)
}

fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };

    let detail = if cfg!(debug_assertions) {
        format!("Internal Server Error: {details}")
    } else {
        "Internal Server Error".to_string()
    };

    ErrorBody::new(detail).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
