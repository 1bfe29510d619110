//! In-memory fixture database.
//!
//! # Partitions
//!
//! - `accounts` - registered users, keyed by [`AccountId`]
//! - `profiles` - free-form user info, at most one per account
//! - `tokens` - access tokens minted by login
//! - `stores` - stores keyed by name, each listing its item names
//! - `items` - catalog items keyed by [`ItemId`], in creation order
//! - `balances` - one balance per account; absence is not the same as zero
//!
//! # Locking
//!
//! All partitions and id counters sit behind one [`RwLock`]. Lookups take
//! the read lock. Every mutation, including id allocation, the whole
//! pay read-check-debit sequence and [`FixtureStore::reset`], runs in a
//! single write-lock critical section, so no request ever observes a
//! half-applied change.

mod accounts;
mod catalog;
pub mod error;
mod ledger;
mod profiles;

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use mock_shop_core::{AccessToken, AccountId, Amount, ItemId, Record, StoreId};
use serde::Serialize;
use serde_json::Value;

pub use accounts::Credentials;
pub use catalog::ItemKey;
pub use error::{StoreError, StoreResult};
pub use ledger::Receipt;

/// Account id that tests use for "a user that does not exist".
///
/// Profile lookups for this id answer "User info not found" instead of
/// "User not found" when no such account exists.
pub const MISSING_PROFILE_SENTINEL: AccountId = AccountId::new(1000);

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Counter-issued id.
    pub id: AccountId,
    /// Unique login name, as sent at registration.
    pub username: Value,
    /// Plaintext password, compared by value on login.
    password: Value,
}

/// A store and the names of the items linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Counter-issued id, exposed on the wire as a string.
    pub id: StoreId,
    /// Unique store name.
    pub name: String,
    /// Names of items created with this store's id, in creation order.
    pub items: Vec<String>,
}

/// A catalog item.
///
/// The item body is kept as a free-form [`Record`] holding `name`, `price`,
/// `store_id` and `itemID` plus whatever fields later updates add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Counter-issued id; the record's `itemID` field may drift from this
    /// after an update, the key does not.
    pub id: ItemId,
    /// Stored fields.
    pub record: Record,
}

impl Item {
    /// The item's current name, if the record still holds a string name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.record.get_str("name")
    }
}

/// Live entity counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Number of registered accounts.
    pub registered_users: usize,
    /// Number of stores.
    pub stores: usize,
    /// Number of items.
    pub items: usize,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<AccountId, Account>,
    profiles: HashMap<AccountId, Record>,
    tokens: HashMap<AccessToken, AccountId>,
    stores: HashMap<String, Store>,
    items: BTreeMap<ItemId, Item>,
    balances: HashMap<AccountId, Amount>,
    next_account: AccountId,
    next_store: StoreId,
    next_item: ItemId,
}

impl Tables {
    fn allocate_account(&mut self) -> AccountId {
        let id = self.next_account;
        self.next_account = id.next();
        id
    }

    fn allocate_store(&mut self) -> StoreId {
        let id = self.next_store;
        self.next_store = id.next();
        id
    }

    fn allocate_item(&mut self) -> ItemId {
        let id = self.next_item;
        self.next_item = id.next();
        id
    }

    fn require_account(&self, id: AccountId, message: &'static str) -> StoreResult<&Account> {
        self.accounts
            .get(&id)
            .ok_or(StoreError::AccountNotFound(message))
    }
}

/// The fixture's process-wide state.
///
/// Constructed once at startup and shared through
/// [`AppState`](crate::state::AppState).
#[derive(Debug, Default)]
pub struct FixtureStore {
    tables: RwLock<Tables>,
}

impl FixtureStore {
    /// Create an empty store with every counter at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Entity counts for the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] if the store lock is poisoned.
    pub fn counts(&self) -> StoreResult<Counts> {
        let tables = self.read()?;
        Ok(Counts {
            registered_users: tables.accounts.len(),
            stores: tables.stores.len(),
            items: tables.items.len(),
        })
    }

    /// Drop every partition and rewind every counter to 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockPoisoned`] if the store lock is poisoned.
    pub fn reset(&self) -> StoreResult<()> {
        let mut tables = self.write()?;
        *tables = Tables::default();
        drop(tables);
        tracing::info!("Fixture state reset");
        Ok(())
    }
}
