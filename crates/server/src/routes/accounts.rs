//! Registration and login handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use mock_shop_core::{AccessToken, AccountId};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::extract::JsonObject;
use crate::state::AppState;
use crate::store::Credentials;

/// Response to a successful registration.
#[derive(Debug, Serialize)]
pub struct Registered {
    pub message: &'static str,
    pub uuid: AccountId,
}

/// Response to a successful login.
#[derive(Debug, Serialize)]
pub struct LoggedIn {
    pub access_token: AccessToken,
}

/// Create an account from `{username, password}`.
#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let id = state.store().register(&Credentials::from_record(&body))?;

    Ok((
        StatusCode::CREATED,
        Json(Registered {
            message: "User created successfully.",
            uuid: id,
        }),
    ))
}

/// Log in with `{username, password}` and return a fresh token.
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let token = state.store().login(&Credentials::from_record(&body))?;

    Ok(Json(LoggedIn {
        access_token: token,
    }))
}
