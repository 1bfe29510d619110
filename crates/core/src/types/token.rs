//! Opaque bearer tokens.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque access token handed out on login.
///
/// Tokens are random UUID v4 strings. They carry no claims and are only
/// meaningful as keys into the fixture's token table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Mint a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Extract the token from an `Authorization` header value.
    ///
    /// One leading `Bearer ` or `JWT ` prefix is removed; the remainder is
    /// taken verbatim, so `Bearer JWT abc` yields `JWT abc`.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let raw = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("JWT "))
            .unwrap_or(header);
        Self(raw.to_string())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
