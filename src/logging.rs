//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};
use serde_json::Value;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
///
/// Password fields in JSON request bodies are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    let is_json = headers
        .headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(is_json_media_type);

    if headers.method == axum::http::Method::POST && is_json {
        log_request(&headers, &redact_passwords(&body_text));
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// Whether a `Content-Type` header value names JSON, ignoring any
/// parameters such as `charset=utf-8`.
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

/// Replace the values of password-carrying JSON fields with asterisks.
///
/// Bodies that are not JSON objects are returned unchanged.
fn redact_passwords(body_text: &str) -> String {
    let Ok(Value::Object(mut fields)) = serde_json::from_str(body_text) else {
        return body_text.to_string();
    };

    for field_name in ["password", "newPassword", "confirmPassword"] {
        if let Some(value) = fields.get_mut(field_name) {
            *value = Value::String("********".to_string());
        }
    }

    Value::Object(fields).to_string()
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Cut `body` to at most `limit` bytes without splitting a multibyte
/// character.
fn truncate_to_char_boundary(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {:}...",
            headers.method,
            headers.uri,
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            headers.method,
            headers.uri
        );
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {:}...",
            headers.status,
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", headers.status);
    }
}



#[cfg(test)]
mod truncate_tests {
    use super::truncate_to_char_boundary;

    #[test]
    fn short_bodies_are_untouched() {
        assert_eq!(truncate_to_char_boundary("hello", 64), "hello");
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        let body = format!("{}é tail", "a".repeat(63));

        let got = truncate_to_char_boundary(&body, 64);

        assert_eq!(got.len(), 63);
        assert!(!got.contains('é'));
    }

    #[test]
    fn truncation_on_a_boundary_keeps_the_full_character() {
        let body = format!("{}é tail", "a".repeat(62));

        let got = truncate_to_char_boundary(&body, 64);

        assert_eq!(got, format!("{}é", "a".repeat(62)));
    }
}
