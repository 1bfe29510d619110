//! Per-account user info.
//!
//! Read, update and delete share one precondition order:
//!
//! 1. the sentinel id with no matching account answers "profile not found"
//! 2. a missing account answers "User not found"
//! 3. a missing profile answers "profile not found"
//!
//! Create skips the sentinel branch and reports a duplicate profile as a
//! conflict instead.

use mock_shop_core::{AccountId, Record};

use super::{FixtureStore, MISSING_PROFILE_SENTINEL, StoreError, StoreResult, Tables};

const USER_NOT_FOUND: &str = "User not found";
const INFO_NOT_FOUND: &str = "User info not found";
const INFO_NOT_FOUND_DOT: &str = "User info not found.";

impl Tables {
    fn check_profile(&self, id: AccountId, not_found: &'static str) -> StoreResult<()> {
        if id == MISSING_PROFILE_SENTINEL && !self.accounts.contains_key(&id) {
            return Err(StoreError::ProfileNotFound(not_found));
        }
        self.require_account(id, USER_NOT_FOUND)?;
        if self.profiles.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ProfileNotFound(not_found))
        }
    }
}

impl FixtureStore {
    /// Store a profile for an account, verbatim.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AccountNotFound`] if the account does not exist
    /// - [`StoreError::ProfileExists`] if the account already has one
    pub fn create_profile(&self, id: AccountId, profile: Record) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.require_account(id, USER_NOT_FOUND)?;
        if tables.profiles.contains_key(&id) {
            return Err(StoreError::ProfileExists);
        }
        tables.profiles.insert(id, profile);
        drop(tables);

        tracing::debug!(account_id = %id, "Profile created");
        Ok(())
    }

    /// Fetch a copy of an account's stored profile.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProfileNotFound`] or [`StoreError::AccountNotFound`],
    /// in the order described in the module docs.
    pub fn profile(&self, id: AccountId) -> StoreResult<Record> {
        let tables = self.read()?;
        tables.check_profile(id, INFO_NOT_FOUND)?;
        tables
            .profiles
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProfileNotFound(INFO_NOT_FOUND))
    }

    /// Shallow-merge `changes` into an account's profile.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProfileNotFound`] or [`StoreError::AccountNotFound`],
    /// in the order described in the module docs.
    pub fn update_profile(&self, id: AccountId, changes: Record) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.check_profile(id, INFO_NOT_FOUND_DOT)?;
        let profile = tables
            .profiles
            .get_mut(&id)
            .ok_or(StoreError::ProfileNotFound(INFO_NOT_FOUND_DOT))?;
        profile.merge(changes);
        drop(tables);

        tracing::debug!(account_id = %id, "Profile updated");
        Ok(())
    }

    /// Remove an account's profile. The account itself is untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProfileNotFound`] or [`StoreError::AccountNotFound`],
    /// in the order described in the module docs.
    pub fn delete_profile(&self, id: AccountId) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.check_profile(id, INFO_NOT_FOUND_DOT)?;
        tables.profiles.remove(&id);
        drop(tables);

        tracing::debug!(account_id = %id, "Profile deleted");
        Ok(())
    }
}
