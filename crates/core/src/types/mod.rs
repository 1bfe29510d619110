//! Core types for Mock Shop.
//!
//! This module provides type-safe wrappers for the fixture's domain concepts.

pub mod amount;
pub mod id;
pub mod record;
pub mod token;

pub use amount::{Amount, AmountError};
pub use id::*;
pub use record::{Record, is_truthy, loose_eq, loose_string};
pub use token::AccessToken;
