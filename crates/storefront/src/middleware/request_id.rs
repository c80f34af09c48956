//! Request ID middleware for request tracing and correlation.
//!
//! Trusts an `x-request-id` supplied by an upstream proxy when it looks
//! sane, otherwise mints a UUID v4. The ID is recorded on the current
//! tracing span, tagged onto the Sentry scope, and echoed in the response
//! headers so clients can quote it in support requests.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream IDs longer than this are treated as garbage and replaced.
const MAX_REQUEST_ID_LENGTH: usize = 64;

/// The request ID from an upstream proxy, if it carries a usable one.
fn upstream_request_id(headers: &HeaderMap) -> Option<String> {
    let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if id.is_empty() || id.len() > MAX_REQUEST_ID_LENGTH {
        return None;
    }
    Some(id.to_owned())
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id =
        upstream_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_id(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(id).expect("value"));
        headers
    }

    #[test]
    fn test_upstream_id_used_when_sane() {
        let headers = headers_with_id("req-abc-123");
        assert_eq!(
            upstream_request_id(&headers),
            Some("req-abc-123".to_owned())
        );
    }

    #[test]
    fn test_missing_or_empty_id_rejected() {
        assert_eq!(upstream_request_id(&HeaderMap::new()), None);
        assert_eq!(upstream_request_id(&headers_with_id("")), None);
    }

    #[test]
    fn test_oversized_id_rejected() {
        let long = "a".repeat(MAX_REQUEST_ID_LENGTH + 1);
        assert_eq!(upstream_request_id(&headers_with_id(&long)), None);
    }
}
