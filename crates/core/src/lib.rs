//! Core business logic for PayUp.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the traits in `store`, implemented by the db
//! crate for Postgres and by `store::memory` in-process.
//!
//! # Modules
//!
//! - `transaction` - Transaction entity, validation and the transaction service
//! - `ledger` - Friendship balances and their versioned updates
//! - `notification` - Best-effort push notifications to the counterpart
//! - `store` - Repository traits and the in-memory store
//! - `user` - Users and device tokens

pub mod ledger;
pub mod notification;
pub mod store;
pub mod transaction;
pub mod user;
