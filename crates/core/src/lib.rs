//! Mock Shop Core - Shared types library.
//!
//! This crate provides the domain types used by the Mock Shop fixture server
//! and its integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no locking, no HTTP. The
//! in-memory store and the request layer live in `mock-shop-server`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, amounts, access tokens and
//!   free-form JSON records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
