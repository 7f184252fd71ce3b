use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::error::{ErrorBody, log_server_error};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites plain-text error responses (extractor rejections, unknown routes,
/// wrong methods) into the `{"detail": ...}` shape. The status is kept as is.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    if is_json_response(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let detail = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => body_bytes_to_detail(status, bytes),
        Err(_) => default_detail(status),
    };
    if status.is_server_error() {
        log_server_error(status, &detail);
    }

    let mut new_response = ErrorBody::new(detail).into_response_with(status);
    copy_headers(&parts.headers, &mut new_response);
    new_response
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("application/json") || value.contains("+json")
        })
        .unwrap_or(false)
}

fn body_bytes_to_detail(status: StatusCode, bytes: Bytes) -> String {
    let detail = String::from_utf8_lossy(&bytes).trim().to_string();
    if detail.is_empty() {
        return default_detail(status);
    }
    detail
}

fn default_detail(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn copy_headers(src: &HeaderMap, dest: &mut Response) {
    for (name, value) in src {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        dest.headers_mut().insert(name.clone(), value.clone());
    }
}
