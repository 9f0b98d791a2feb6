//! Versioned balance writes.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::balance::{Contribution, FriendshipData, Posting};
use super::error::LedgerError;
use crate::store::FriendshipRepository;
use crate::transaction::RelatedObject;

/// Attempts made before giving up on a contended balance.
pub const MAX_ATTEMPTS: usize = 5;

/// Posts transaction effects to friendship balances.
pub struct BalanceLedger<S> {
    store: Arc<S>,
}

impl<S> Clone for BalanceLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: FriendshipRepository> BalanceLedger<S> {
    /// Creates a ledger over a store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Posts a contribution to the balance of the object it belongs to.
    ///
    /// Group transactions have no balance and yield `Ok(None)`. Otherwise the
    /// aggregate is loaded, adjusted and written back with a version check,
    /// reloading and retrying up to `MAX_ATTEMPTS` times if another writer
    /// wins. Returns the balance as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the friendship is missing, every attempt conflicts,
    /// or the store fails.
    pub async fn post(
        &self,
        related: RelatedObject,
        posting: Posting,
        contribution: &Contribution,
    ) -> Result<Option<FriendshipData>, LedgerError> {
        let Some(friendship_id) = related.friendship() else {
            return Ok(None);
        };

        for attempt in 1..=MAX_ATTEMPTS {
            let mut friendship = self
                .store
                .find_friendship(friendship_id)
                .await?
                .ok_or(LedgerError::FriendshipNotFound(friendship_id))?;

            let delta = friendship.delta(posting, contribution);
            if delta == 0 {
                return Ok(Some(friendship));
            }

            let expected_version = friendship.version;
            friendship.balance += delta;
            if self
                .store
                .save_friendship(&friendship, expected_version)
                .await?
            {
                friendship.version = expected_version + 1;
                debug!(
                    %friendship_id,
                    ?posting,
                    delta,
                    balance = friendship.balance,
                    "friendship balance updated"
                );
                return Ok(Some(friendship));
            }

            debug!(%friendship_id, attempt, "friendship balance changed underneath, retrying");
        }

        Err(LedgerError::ConcurrentModification {
            friendship_id,
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Posts like [`Self::post`] but logs failures instead of returning them.
    ///
    /// The transaction write is the primary effect; a balance that could not
    /// be adjusted must not fail the request.
    pub async fn post_logged(
        &self,
        related: RelatedObject,
        posting: Posting,
        contribution: &Contribution,
    ) -> Option<FriendshipData> {
        match self.post(related, posting, contribution).await {
            Ok(friendship) => friendship,
            Err(err @ LedgerError::FriendshipNotFound(_)) => {
                warn!(error = %err, code = err.error_code(), "skipping balance update");
                None
            }
            Err(err) => {
                error!(
                    error = %err,
                    code = err.error_code(),
                    ?posting,
                    "friendship balance is now out of step with its transactions"
                );
                None
            }
        }
    }
}
