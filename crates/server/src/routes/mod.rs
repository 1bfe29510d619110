//! HTTP route handlers for the fixture.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                  - Discovery document
//! GET    /health            - Liveness + entity counts
//! POST   /reset             - Clear all state
//!
//! # Accounts
//! POST   /register          - Create account
//! POST   /auth              - Log in, returns access token
//!
//! # Profiles (requires token)
//! POST   /user_info/{id}    - Create profile
//! GET    /user_info/{id}    - Read profile projection
//! PUT    /user_info/{id}    - Shallow-merge profile
//! DELETE /user_info/{id}    - Delete profile
//!
//! # Catalog (requires token)
//! POST   /store/{name}      - Create store
//! GET    /store/{name}      - Read store
//! POST   /item/{name}       - Create item
//! GET    /item/{key}        - Read item by id (digits) or name
//! PUT    /item/{key}        - Shallow-merge item by id (digits) or name
//! GET    /items             - List items
//!
//! # Money (requires token)
//! POST   /balance/{id}      - Set balance
//! GET    /balance/{id}      - Read balance
//! POST   /pay/{id}          - Pay for an item
//! ```

pub mod accounts;
pub mod balances;
pub mod items;
pub mod meta;
pub mod profiles;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// A body holding only a `message`.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    /// Wrap a static message.
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        post(profiles::create)
            .get(profiles::show)
            .put(profiles::update)
            .delete(profiles::delete),
    )
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/store/{name}", post(stores::create).get(stores::show))
        .route(
            "/item/{key}",
            post(items::create).get(items::show).put(items::update),
        )
        .route("/items", get(items::index))
}

/// Create the balance and payment routes router.
pub fn money_routes() -> Router<AppState> {
    Router::new()
        .route("/balance/{id}", post(balances::set).get(balances::show))
        .route("/pay/{id}", post(balances::pay))
}

/// Create all routes for the fixture.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Lifecycle
        .route("/", get(meta::discovery))
        .route("/health", get(meta::health))
        .route("/reset", post(meta::reset))
        // Accounts
        .route("/register", post(accounts::register))
        .route("/auth", post(accounts::login))
        // Profiles
        .nest("/user_info", profile_routes())
        // Catalog
        .merge(catalog_routes())
        // Money
        .merge(money_routes())
}

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
