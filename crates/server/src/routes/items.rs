//! Item handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mock_shop_core::Record;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::extract::JsonObject;
use crate::middleware::RequireToken;
use crate::state::AppState;
use crate::store::ItemKey;

/// Response to item creation. `store_id` is stored but not echoed.
#[derive(Debug, Serialize)]
pub struct CreatedItem {
    pub name: Value,
    pub price: Value,
    #[serde(rename = "itemID")]
    pub item_id: Value,
}

/// Item listing.
#[derive(Debug, Serialize)]
pub struct ItemList {
    pub items: Vec<Record>,
}

/// Create an item named by the path segment, even an all-digit one.
#[instrument(skip(state, body))]
pub async fn create(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let item = state.store().create_item(&name, body)?;
    let record = &item.record;

    Ok((
        StatusCode::CREATED,
        Json(CreatedItem {
            name: record.get_or_null("name"),
            price: record.get_or_null("price"),
            item_id: record.get_or_null("itemID"),
        }),
    ))
}

/// Read an item by id (all-digit segment) or name.
#[instrument(skip(state))]
pub async fn show(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    let item = state.store().item(&ItemKey::from_segment(&key))?;
    Ok(Json(item.record))
}

/// Shallow-merge the body into an item and return the updated record.
#[instrument(skip(state, body))]
pub async fn update(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    Path(key): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let item = state
        .store()
        .update_item(&ItemKey::from_segment(&key), body)?;
    Ok(Json(item.record))
}

/// List every item in creation order.
#[instrument(skip(state))]
pub async fn index(
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let items = state
        .store()
        .items()?
        .into_iter()
        .map(|item| item.record)
        .collect();
    Ok(Json(ItemList { items }))
}
