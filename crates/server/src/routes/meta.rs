//! Lifecycle endpoints: discovery, health and reset.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::Counts;

/// Health response with live entity counts.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(flatten)]
    pub counts: Counts,
}

/// Reset acknowledgement.
#[derive(Debug, Serialize)]
pub struct ResetComplete {
    pub message: &'static str,
    pub status: &'static str,
}

/// Static route listing, grouped by area.
fn endpoint_catalog() -> Value {
    json!({
        "Authentication": {
            "POST /auth": "Log in and receive an access token",
            "POST /register": "Register a user"
        },
        "User Info": {
            "POST /user_info/<user_id>": "Add user info",
            "GET /user_info/<user_id>": "Get user info",
            "PUT /user_info/<user_id>": "Update user info",
            "DELETE /user_info/<user_id>": "Delete user info"
        },
        "Store Management": {
            "POST /store/<store_name>": "Create a store",
            "GET /store/<store_name>": "Get store info"
        },
        "Item Management": {
            "POST /item/<item_name>": "Add an item",
            "GET /item/<item_id>": "Get item info",
            "PUT /item/<item_id>": "Update item info",
            "GET /items": "List all items"
        },
        "Balance Management": {
            "POST /balance/<user_id>": "Set user balance",
            "GET /balance/<user_id>": "Get user balance"
        },
        "Payment": {
            "POST /pay/<user_id>": "Buy an item"
        }
    })
}

/// Discovery document. Never touches the store.
pub async fn discovery(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": "Mock API Server is running!",
        "available_endpoints": endpoint_catalog(),
        "usage": "A stateful mock server for API test suites",
        "port": state.config().port,
    }))
}

/// Liveness plus entity counts.
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let counts = state.store().counts()?;
    Ok(Json(Health {
        status: "healthy",
        message: "Mock API Server is running",
        counts,
    }))
}

/// Drop every entity and restart all id counters at 1.
#[instrument(skip(state))]
pub async fn reset(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.store().reset()?;
    Ok(Json(ResetComplete {
        message: "All data has been reset successfully",
        status: "reset_complete",
    }))
}
