//! Balance and payment handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use mock_shop_core::Amount;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::extract::{AccountPath, JsonObject};
use crate::middleware::RequireToken;
use crate::state::AppState;
use crate::store::Receipt;

/// A message plus the resulting balance.
#[derive(Debug, Serialize)]
pub struct BalanceView {
    pub message: &'static str,
    pub balance: Amount,
}

/// Response to a successful payment.
#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub message: &'static str,
    pub balance: Amount,
    pub name: Value,
    pub price: Amount,
}

impl From<Receipt> for PaymentView {
    fn from(receipt: Receipt) -> Self {
        Self {
            message: "Payment successful",
            balance: receipt.balance,
            name: receipt.name,
            price: receipt.price,
        }
    }
}

/// Overwrite an account's balance with `{balance}`.
#[instrument(skip(state, body))]
pub async fn set(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let balance = state.store().set_balance(id, &body)?;
    Ok((
        StatusCode::CREATED,
        Json(BalanceView {
            message: "Balance added successfully",
            balance,
        }),
    ))
}

/// Read an account's balance.
#[instrument(skip(state))]
pub async fn show(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let balance = state.store().balance(id)?;
    Ok(Json(BalanceView {
        message: "Balance retrieved successfully",
        balance,
    }))
}

/// Pay for the item referenced by `{itemId}`.
#[instrument(skip(state, body))]
pub async fn pay(
    AccountPath(id): AccountPath,
    RequireToken(_caller): RequireToken,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse> {
    let receipt = state.store().pay(id, body.get("itemId"))?;
    Ok(Json(PaymentView::from(receipt)))
}
