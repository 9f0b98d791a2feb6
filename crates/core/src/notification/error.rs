//! Notification errors. Only ever logged.

use std::time::Duration;

use payup_shared::PushError;
use payup_shared::types::UserId;
use thiserror::Error;

use crate::store::StoreError;

/// Reasons a notification was not delivered.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Looking up the audience's device token failed.
    #[error("device token lookup for user {user_id} failed: {source}")]
    TokenLookup {
        /// Audience.
        user_id: UserId,
        /// Underlying failure.
        source: StoreError,
    },

    /// Looking up the creator's name failed.
    #[error("creator lookup for user {user_id} failed: {source}")]
    CreatorLookup {
        /// Creator.
        user_id: UserId,
        /// Underlying failure.
        source: StoreError,
    },

    /// The gateway call failed.
    #[error(transparent)]
    Push(#[from] PushError),

    /// The gateway did not answer in time.
    #[error("push gateway did not answer within {0:?}")]
    Timeout(Duration),
}

impl NotificationError {
    /// Returns true if the failure is expected in a deployment without a gateway key.
    #[must_use]
    pub const fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Push(PushError::NotConfigured))
    }
}
