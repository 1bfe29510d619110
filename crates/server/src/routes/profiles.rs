//! Profile (user info) handlers.

use axum::{Json, extract::State, response::IntoResponse};
use mock_shop_core::{AccountId, Record};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::Message;
use crate::error::Result;
use crate::extract::{AccountPath, JsonObject};
use crate::middleware::RequireToken;
use crate::state::AppState;

/// The fixed projection returned when reading a profile.
///
/// `street` and `city` are lifted out of the stored `address` object; every
/// other stored field is omitted.
#[derive(Debug, Serialize, PartialEq)]
pub struct ProfileView {
    pub phone: Value,
    pub email: Value,
    #[serde(rename = "userID")]
    pub user_id: AccountId,
    pub street: Value,
    pub city: Value,
}

impl ProfileView {
    fn project(user_id: AccountId, profile: &Record) -> Self {
        let address = profile.get("address").and_then(Value::as_object);
        let from_address = |key: &str| {
            address
                .and_then(|a| a.get(key))
                .cloned()
                .unwrap_or(Value::Null)
        };

        Self {
            phone: profile.get_or_null("phone"),
            email: profile.get_or_null("email"),
            user_id,
            street: from_address("street"),
            city: from_address("city"),
        }
    }
}

/// Store a new profile for an account.
#[instrument(skip(state, body))]
pub async fn create(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    state.store().create_profile(id, body)?;
    Ok(Json(Message::new("User info created successfully.")))
}

/// Read an account's profile projection.
#[instrument(skip(state))]
pub async fn show(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let profile = state.store().profile(id)?;
    Ok(Json(ProfileView::project(id, &profile)))
}

/// Shallow-merge the body into an account's profile.
#[instrument(skip(state, body))]
pub async fn update(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    state.store().update_profile(id, body)?;
    Ok(Json(Message::new("User info updated successfully.")))
}

/// Delete an account's profile.
#[instrument(skip(state))]
pub async fn delete(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    state.store().delete_profile(id)?;
    Ok(Json(Message::new("User info deleted.")))
}
