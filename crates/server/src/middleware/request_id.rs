//! Request ID middleware for correlating test-runner calls with log lines.
//!
//! A test runner may tag each call with its own `x-request-id`; the fixture
//! reuses a well-formed one and otherwise mints a UUID v4. The chosen id is
//! recorded on the `http_request` span, echoed back in the response headers
//! and, when a Sentry client is configured, set as a scope tag.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is reused as-is.
pub const MAX_CLIENT_REQUEST_ID_LEN: usize = 128;

/// A usable client id: printable, non-blank after trimming, and short.
fn client_request_id(request: &Request) -> Option<String> {
    let raw = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    (!raw.is_empty() && raw.len() <= MAX_CLIENT_REQUEST_ID_LEN).then(|| raw.to_string())
}

fn sentry_enabled() -> bool {
    sentry::Hub::current()
        .client()
        .is_some_and(|client| client.is_enabled())
}

/// Middleware that gives every request an id.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = client_request_id(&request).unwrap_or_else(|| {
        let generated = Uuid::new_v4().to_string();
        tracing::trace!(request_id = %generated, "No usable client request id");
        generated
    });

    Span::current().record("request_id", request_id.as_str());
    if sentry_enabled() {
        sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));
    }

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
