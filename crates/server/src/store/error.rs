//! Store error types.
//!
//! Every variant's `Display` output is the exact `message` text clients
//! receive, so tests and handlers can compare against `to_string()`.

use axum::http::StatusCode;
use mock_shop_core::{AccountId, Amount};
use thiserror::Error;

/// Errors returned by [`FixtureStore`](super::FixtureStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field is missing, empty or of the wrong type.
    #[error("{0}")]
    Validation(&'static str),

    /// Registration with a username that is already taken.
    #[error("User already exists")]
    UsernameTaken {
        /// Id of the account that owns the username.
        existing: AccountId,
    },

    /// A store with this name already exists.
    #[error("A store with name '{0}' already exists.")]
    StoreNameTaken(String),

    /// An item with this name already exists.
    #[error("An item with name '{0}' already exists.")]
    ItemNameTaken(String),

    /// The account already has a profile.
    #[error("User info already exists")]
    ProfileExists,

    /// The balance does not cover the item price.
    #[error("Not enough money. Your balance is {balance}, item cost {price}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: Amount,
        /// Price of the item.
        price: Amount,
    },

    /// No `Authorization` header was presented.
    #[error("Request does not contain an access token")]
    AuthRequired,

    /// The token is unknown, or the login body is malformed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No account matches the login username and password.
    #[error("Invalid credentials")]
    UnknownLogin,

    /// The account does not exist. Message text varies per endpoint.
    #[error("{0}")]
    AccountNotFound(&'static str),

    /// No store with this name.
    #[error("Store not found")]
    StoreNotFound,

    /// No item with this name or id.
    #[error("Item not found")]
    ItemNotFound,

    /// The account has no profile. Message text varies per endpoint.
    #[error("{0}")]
    ProfileNotFound(&'static str),

    /// The account has no balance record.
    #[error("Balance not found. Add money for user.")]
    BalanceNotFound,

    /// A handler panicked while holding the store lock.
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::UsernameTaken { .. }
            | Self::StoreNameTaken(_)
            | Self::ItemNameTaken(_)
            | Self::ProfileExists
            | Self::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            Self::AuthRequired | Self::InvalidCredentials | Self::UnknownLogin => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountNotFound(_)
            | Self::StoreNotFound
            | Self::ItemNotFound
            | Self::ProfileNotFound(_)
            | Self::BalanceNotFound => StatusCode::NOT_FOUND,
            Self::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is a uniqueness violation.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken { .. }
                | Self::StoreNameTaken(_)
                | Self::ItemNameTaken(_)
                | Self::ProfileExists
        )
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
