//! HTTP middleware stack for the fixture server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: protected handlers take the
//! [`RequireToken`] extractor, so public routes stay untouched.

pub mod auth;
pub mod request_id;

pub use auth::RequireToken;
pub use request_id::request_id_middleware;
