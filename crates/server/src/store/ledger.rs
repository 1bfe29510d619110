//! Balances and payments.

use mock_shop_core::{AccountId, Amount, AmountError, ItemId, Record};
use serde_json::Value;

use super::{FixtureStore, StoreError, StoreResult};

const USER_NOT_FOUND: &str = "User not found";
const USER_NOT_FOUND_DOT: &str = "User not found.";
const BALANCE_NOT_A_NUMBER: &str = "Balance must be a number";
const BALANCE_OUT_OF_RANGE: &str = "Balance is out of range";
const PRICE_NOT_A_NUMBER: &str = "Item price must be a number";
const PRICE_OUT_OF_RANGE: &str = "Item price is out of range";

/// Outcome of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Balance after the debit.
    pub balance: Amount,
    /// The item's stored name.
    pub name: Value,
    /// Amount debited.
    pub price: Amount,
}

fn parse_amount(
    value: &Value,
    not_a_number: &'static str,
    out_of_range: &'static str,
) -> StoreResult<Amount> {
    Amount::from_json(value).map_err(|e| match e {
        AmountError::NotANumber(_) => StoreError::Validation(not_a_number),
        AmountError::OutOfRange(_) => StoreError::Validation(out_of_range),
    })
}

/// Read a JSON item reference: any non-negative integral number.
fn item_id_from_json(value: &Value) -> Option<ItemId> {
    if let Some(id) = value.as_u64() {
        return Some(ItemId::new(id));
    }
    let float = value.as_f64()?;
    if float.fract() != 0.0 || float < 0.0 || float > 9_007_199_254_740_992.0 {
        return None;
    }
    format!("{float:.0}").parse().ok()
}

impl FixtureStore {
    /// Set an account's balance from the body's `balance` field.
    ///
    /// The stored value is overwritten, not accumulated. A missing field
    /// sets the balance to zero.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AccountNotFound`] if the account does not exist
    /// - [`StoreError::Validation`] if `balance` is present but not a number,
    ///   or a number too large to hold
    pub fn set_balance(&self, id: AccountId, body: &Record) -> StoreResult<Amount> {
        let mut tables = self.write()?;
        tables.require_account(id, USER_NOT_FOUND_DOT)?;

        let amount = match body.get("balance") {
            None => Amount::ZERO,
            Some(value) => parse_amount(value, BALANCE_NOT_A_NUMBER, BALANCE_OUT_OF_RANGE)?,
        };
        tables.balances.insert(id, amount);
        drop(tables);

        tracing::info!(account_id = %id, balance = %amount, "Balance set");
        Ok(amount)
    }

    /// Fetch an account's balance.
    ///
    /// The balance record is checked before the account, so an unknown
    /// account without a balance reports a missing balance rather than a
    /// missing user.
    ///
    /// # Errors
    ///
    /// - [`StoreError::BalanceNotFound`] if no balance has been set
    /// - [`StoreError::AccountNotFound`] if the account does not exist
    pub fn balance(&self, id: AccountId) -> StoreResult<Amount> {
        let tables = self.read()?;
        let amount = tables
            .balances
            .get(&id)
            .copied()
            .ok_or(StoreError::BalanceNotFound)?;
        tables.require_account(id, USER_NOT_FOUND)?;
        Ok(amount)
    }

    /// Pay for an item out of an account's balance.
    ///
    /// The lookups, the funds check and the debit happen under one write
    /// lock, so concurrent payments against the same balance cannot both
    /// spend it. There is no idempotency key: each call debits again.
    ///
    /// # Errors
    ///
    /// In order of precedence:
    /// - [`StoreError::AccountNotFound`]
    /// - [`StoreError::ItemNotFound`], including a missing or non-integral `item`
    /// - [`StoreError::BalanceNotFound`]
    /// - [`StoreError::Validation`] if the item's price is not a number or is
    ///   too large to hold
    /// - [`StoreError::InsufficientFunds`] if the balance is below the price
    pub fn pay(&self, id: AccountId, item: Option<&Value>) -> StoreResult<Receipt> {
        let mut tables = self.write()?;
        tables.require_account(id, USER_NOT_FOUND)?;

        let (name, price) = {
            let item = item
                .and_then(item_id_from_json)
                .and_then(|item_id| tables.items.get(&item_id))
                .ok_or(StoreError::ItemNotFound)?;
            (item.record.get_or_null("name"), item.record.get_or_null("price"))
        };

        let balance = tables
            .balances
            .get_mut(&id)
            .ok_or(StoreError::BalanceNotFound)?;
        let price = parse_amount(&price, PRICE_NOT_A_NUMBER, PRICE_OUT_OF_RANGE)?;
        if *balance < price {
            return Err(StoreError::InsufficientFunds {
                balance: *balance,
                price,
            });
        }

        let remaining = balance
            .checked_sub(price)
            .ok_or(StoreError::Validation(PRICE_NOT_A_NUMBER))?;
        *balance = remaining;
        drop(tables);

        tracing::info!(account_id = %id, %price, balance = %remaining, "Payment accepted");
        Ok(Receipt {
            balance: remaining,
            name,
            price,
        })
    }
}
