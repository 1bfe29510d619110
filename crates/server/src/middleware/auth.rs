//! Bearer-token authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use mock_shop_core::AccountId;
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a live access token.
///
/// Reads the `Authorization` header, strips one `Bearer ` or `JWT ` prefix
/// and resolves the token to the account that logged in. The account id is
/// available to the handler, but handlers do not restrict access by it:
/// any valid token may act on any account.
///
/// Rejects with a 401 `AuthRequired` body when the header is missing and
/// a 401 `InvalidCredentials` body when the token is unknown.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireToken(account_id): RequireToken,
/// ) -> impl IntoResponse {
///     format!("Hello, account {account_id}!")
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireToken(pub AccountId);

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        let account_id = state.store().authenticate(header.as_deref())?;
        Span::current().record("account_id", account_id.as_u64());

        Ok(Self(account_id))
    }
}
