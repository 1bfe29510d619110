//! Registration, login and token checks.

use mock_shop_core::{AccessToken, AccountId, Record, is_truthy, loose_eq};
use serde_json::Value;

use super::{Account, FixtureStore, StoreError, StoreResult};

const MISSING_CREDENTIALS: &str = "Username and password are required fields";

/// A username and password as sent by the client.
///
/// Both are kept as raw JSON: any value a client would consider "set"
/// (a non-empty string, a non-zero number, `true`, ...) is accepted and
/// compared by value on login.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: Value,
    pub password: Value,
}

impl Credentials {
    /// Build credentials from any JSON-convertible pair.
    #[must_use]
    pub fn new(username: impl Into<Value>, password: impl Into<Value>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read `username` and `password` from a request body; absent fields are `null`.
    #[must_use]
    pub fn from_record(body: &Record) -> Self {
        Self::new(body.get_or_null("username"), body.get_or_null("password"))
    }

    fn is_complete(&self) -> bool {
        is_truthy(&self.username) && is_truthy(&self.password)
    }
}

impl FixtureStore {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if either field is missing or blank
    /// - [`StoreError::UsernameTaken`] carrying the existing account's id
    pub fn register(&self, credentials: &Credentials) -> StoreResult<AccountId> {
        if !credentials.is_complete() {
            return Err(StoreError::Validation(MISSING_CREDENTIALS));
        }
        let Credentials { username, password } = credentials;

        let mut tables = self.write()?;
        if let Some(existing) = tables
            .accounts
            .values()
            .find(|a| loose_eq(&a.username, username))
        {
            return Err(StoreError::UsernameTaken {
                existing: existing.id,
            });
        }

        let id = tables.allocate_account();
        tables.accounts.insert(
            id,
            Account {
                id,
                username: username.clone(),
                password: password.clone(),
            },
        );
        drop(tables);

        tracing::info!(account_id = %id, %username, "Account registered");
        Ok(id)
    }

    /// Log in and mint a new access token.
    ///
    /// Every successful login adds a token; earlier tokens stay valid.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidCredentials`] if either field is missing or blank
    /// - [`StoreError::UnknownLogin`] if no account matches both fields
    pub fn login(&self, credentials: &Credentials) -> StoreResult<AccessToken> {
        if !credentials.is_complete() {
            return Err(StoreError::InvalidCredentials);
        }
        let Credentials { username, password } = credentials;

        let mut tables = self.write()?;
        let account_id = tables
            .accounts
            .values()
            .find(|a| loose_eq(&a.username, username) && loose_eq(&a.password, password))
            .map(|a| a.id)
            .ok_or(StoreError::UnknownLogin)?;

        let token = AccessToken::generate();
        tables.tokens.insert(token.clone(), account_id);
        drop(tables);

        tracing::debug!(account_id = %account_id, "Access token issued");
        Ok(token)
    }

    /// Resolve an `Authorization` header to the account that owns the token.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AuthRequired`] if there is no header
    /// - [`StoreError::InvalidCredentials`] if the token is not live
    pub fn authenticate(&self, header: Option<&str>) -> StoreResult<AccountId> {
        let header = header.ok_or(StoreError::AuthRequired)?;
        let token = AccessToken::from_header(header);

        self.read()?
            .tokens
            .get(&token)
            .copied()
            .ok_or(StoreError::InvalidCredentials)
    }
}
