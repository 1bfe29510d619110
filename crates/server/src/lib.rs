//! Mock Shop fixture server.
//!
//! A stateful, in-memory imitation of a small e-commerce backend (accounts,
//! tokens, profiles, stores, items, balances and payments) for API test
//! suites to run against.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - One [`FixtureStore`](store::FixtureStore) holding every entity behind a
//!   single lock, shared through [`AppState`]
//! - Bearer-token auth as an extractor on protected handlers
//! - `tracing` spans per request, Sentry for internal errors
//!
//! State lives for the process lifetime or until `POST /reset`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use config::FixtureConfig;
pub use state::AppState;

/// Build the full application router around `state`.
///
/// Used by the binary and by the integration-test harness, so both serve
/// the exact same stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                status = tracing::field::Empty,
                                latency_ms = tracing::field::Empty,
                                request_id = tracing::field::Empty,
                                account_id = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                                span.record("status", response.status().as_u16());
                                span.record(
                                    "latency_ms",
                                    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                                );
                                DefaultOnResponse::default().on_response(response, latency, span);
                            },
                        ),
                )
                .layer(axum::middleware::from_fn(
                    middleware::request_id_middleware,
                )),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
