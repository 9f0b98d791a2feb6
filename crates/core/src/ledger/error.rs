//! Ledger error types.

use payup_shared::types::FriendshipId;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while posting to a friendship balance.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The friendship has no balance row.
    #[error("Friendship balance not found: {0}")]
    FriendshipNotFound(FriendshipId),

    /// Every attempt lost a race with another writer.
    #[error("Concurrent modification of friendship {friendship_id} after {attempts} attempts")]
    ConcurrentModification {
        /// Contended friendship.
        friendship_id: FriendshipId,
        /// Attempts made.
        attempts: usize,
    },

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for logs and API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FriendshipNotFound(_) => "FRIENDSHIP_NOT_FOUND",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }
}
