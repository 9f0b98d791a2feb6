//! Persistence seams.
//!
//! The service layer only talks to these traits. The db crate implements them
//! on Postgres; [`memory::InMemoryStore`] implements them in-process for the
//! server's `memory://` mode and for tests.

use std::future::Future;

use payup_shared::types::{FriendshipId, TransactionId, UserId};
use thiserror::Error;

use crate::ledger::FriendshipData;
use crate::transaction::{NewTransaction, Transaction, TransactionFilter};
use crate::user::{DeviceToken, User};

pub mod memory;

pub use memory::InMemoryStore;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database failed.
    #[error("database error: {0}")]
    Database(String),

    /// A row expected to exist is gone.
    #[error("record not found: {0}")]
    Missing(String),

    /// A stored value could not be mapped back to a domain type.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Transaction persistence.
pub trait TransactionRepository: Send + Sync {
    /// Finds a live (not deleted) transaction.
    fn find_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>, StoreError>> + Send;

    /// Stores a new transaction and returns it with its assigned id and timestamps.
    fn create_transaction(
        &self,
        creator_id: UserId,
        new: NewTransaction,
    ) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    /// Persists the mutable fields (type, amount, memo) and bumps `updated_at`.
    fn save_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    /// Marks a transaction deleted. Deleted transactions are never returned again.
    fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Lists matching transactions, newest first.
    fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;
}

/// Friendship balance persistence.
pub trait FriendshipRepository: Send + Sync {
    /// Loads a friendship's balance aggregate.
    fn find_friendship(
        &self,
        id: FriendshipId,
    ) -> impl Future<Output = Result<Option<FriendshipData>, StoreError>> + Send;

    /// Writes `friendship.balance` if the stored version still equals
    /// `expected_version`, incrementing the version.
    ///
    /// Returns `false` when another writer got there first.
    fn save_friendship(
        &self,
        friendship: &FriendshipData,
        expected_version: i64,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Device token lookup.
pub trait DeviceTokenRepository: Send + Sync {
    /// Returns one registered token for the user, if any.
    fn find_device_token(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<DeviceToken>, StoreError>> + Send;
}

/// User lookup.
pub trait UserRepository: Send + Sync {
    /// Finds a user.
    fn find_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
}

/// Everything the transaction service needs from persistence.
pub trait Store:
    TransactionRepository + FriendshipRepository + DeviceTokenRepository + UserRepository + 'static
{
}

impl<T> Store for T where
    T: TransactionRepository
        + FriendshipRepository
        + DeviceTokenRepository
        + UserRepository
        + 'static
{
}
