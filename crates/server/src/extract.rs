//! Request extractors for lenient JSON bodies and numeric path ids.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use mock_shop_core::{AccountId, Record};

use crate::error::AppError;

/// A request body read as a JSON object.
///
/// Never rejects: an empty, malformed or non-object body yields an empty
/// [`Record`], so handlers see "field absent" and take their normal
/// validation branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonObject(pub Record);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let record = Bytes::from_request(req, state)
            .await
            .map_or_else(|_| Record::new(), |bytes| Record::from_json_bytes(&bytes));
        Ok(Self(record))
    }
}

/// An account id taken from the single `{id}` path segment.
///
/// Only all-digit segments match. Anything else is treated as an unknown
/// route (404 `Not found`) before authentication runs, so this extractor
/// must come before [`RequireToken`](crate::middleware::RequireToken) in a
/// handler's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPath(pub AccountId);

impl<S> FromRequestParts<S> for AccountPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RouteNotFound)?;
        segment
            .parse::<AccountId>()
            .map(Self)
            .map_err(|_| AppError::RouteNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn echo(AccountPath(id): AccountPath, JsonObject(body): JsonObject) -> String {
        format!("{id}:{}", body.len())
    }

    async fn call(uri: &str, body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/balance/{id}", post(echo));
        let response = app
            .oneshot(
                axum::http::Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_object_body_and_numeric_path() {
        let (status, text) = call("/balance/7", r#"{"balance": 1, "x": 2}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "7:2");
    }

    #[tokio::test]
    async fn test_malformed_body_reads_as_empty() {
        assert_eq!(call("/balance/1", "{oops").await.1, "1:0");
        assert_eq!(call("/balance/1", "").await.1, "1:0");
        assert_eq!(call("/balance/1", "[1,2]").await.1, "1:0");
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_not_found() {
        let (status, text) = call("/balance/abc", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({"message": "Not found"}));
    }
}
