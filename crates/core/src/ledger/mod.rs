//! Friendship balance ledger.
//!
//! Each friendship carries one signed balance in cents, expressed from the
//! point of view of its positive user. Every stored transaction belonging to
//! the friendship contributes to it exactly once: applied forward when it is
//! created, reversed when it is deleted, and reversed then re-applied when it
//! is edited.
//!
//! Writes use optimistic concurrency. The aggregate carries a version that the
//! store compares before writing, and a lost race is retried on fresh data.

pub mod balance;
pub mod error;
pub mod service;

#[cfg(test)]
mod balance_props;

pub use balance::{Contribution, FriendshipData, Posting};
pub use error::LedgerError;
pub use service::{BalanceLedger, MAX_ATTEMPTS};
