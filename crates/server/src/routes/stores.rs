//! Store handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireToken;
use crate::state::AppState;
use crate::store::Store;

/// Wire shape of a store.
///
/// The id goes out as a string, unlike account and item ids.
#[derive(Debug, Serialize)]
pub struct StoreView {
    pub name: String,
    pub uuid: String,
    pub items: Vec<String>,
}

impl From<Store> for StoreView {
    fn from(store: Store) -> Self {
        Self {
            name: store.name,
            uuid: store.id.to_string(),
            items: store.items,
        }
    }
}

/// Create an empty store.
#[instrument(skip(state))]
pub async fn create(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let store = state.store().create_store(&name)?;
    Ok((StatusCode::CREATED, Json(StoreView::from(store))))
}

/// Read a store and the names of its items.
#[instrument(skip(state))]
pub async fn show(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let store = state.store().store(&name)?;
    Ok(Json(StoreView::from(store)))
}
