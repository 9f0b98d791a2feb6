//! Transaction service.
//!
//! Orchestrates validation, persistence, balance postings and notifications.
//! The transaction write is the primary effect: once it succeeds, balance and
//! notification failures are logged and the request still succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use payup_shared::types::{TransactionId, UserId};
use tracing::{error, info, warn};

use super::error::TransactionError;
use super::types::{
    RelatedObject, Transaction, TransactionDraft, TransactionFilter, TransactionPatch,
    TransactionView,
};
use super::validation::validate;
use crate::ledger::{BalanceLedger, Contribution, Posting};
use crate::notification::Notifier;
use crate::store::{Store, StoreError};
use crate::user::User;

/// Transaction operations on behalf of an authenticated user.
pub struct TransactionService<S, N> {
    store: Arc<S>,
    ledger: BalanceLedger<S>,
    notifier: Arc<N>,
}

impl<S, N> Clone for TransactionService<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ledger: self.ledger.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S: Store, N: Notifier> TransactionService<S, N> {
    /// Creates a service.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            ledger: BalanceLedger::new(Arc::clone(&store)),
            store,
            notifier,
        }
    }

    /// Records a new transaction created by `caller`.
    ///
    /// Friendship transactions are posted forward to the friendship balance,
    /// then the counterpart is notified.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad draft and `Store` if it cannot be saved.
    pub async fn create(
        &self,
        caller: UserId,
        draft: &TransactionDraft,
    ) -> Result<TransactionView, TransactionError> {
        let new = validate(draft)?;
        let transaction = self.store.create_transaction(caller, new).await?;
        info!(
            transaction_id = %transaction.id,
            creator_id = %caller,
            amount = transaction.amount,
            "transaction created"
        );

        self.ledger
            .post_logged(
                transaction.related_object,
                Posting::Forward,
                &Contribution::from(&transaction),
            )
            .await;

        let view = self.resolve(transaction, &mut HashMap::new()).await;
        self.notifier
            .notify(&view.transaction, view.creator.as_ref())
            .await;
        Ok(view)
    }

    /// Edits the type, amount or memo of a transaction `caller` created.
    ///
    /// The merged result is validated as a whole. The old contribution is
    /// reversed out of the balance before saving and the new one posted after.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, `Validation`, or `Store` if the edit
    /// cannot be saved.
    pub async fn update(
        &self,
        caller: UserId,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> Result<TransactionView, TransactionError> {
        let previous = self.load_owned(caller, id).await?;

        let mut draft = previous.to_draft();
        patch.merge_into(&mut draft);
        let merged = validate(&draft)?;

        let mut edited = previous.clone();
        edited.kind = merged.kind;
        edited.amount = merged.amount;
        edited.memo = merged.memo;

        let before = Contribution::from(&previous);
        self.ledger
            .post_logged(previous.related_object, Posting::Reverse, &before)
            .await;

        let saved = match self.store.save_transaction(&edited).await {
            Ok(saved) => saved,
            Err(err) => {
                self.restore(previous.related_object, &before).await;
                return Err(gone_as_not_found(id, err));
            }
        };
        info!(transaction_id = %saved.id, amount = saved.amount, "transaction updated");

        self.ledger
            .post_logged(
                saved.related_object,
                Posting::Forward,
                &Contribution::from(&saved),
            )
            .await;

        let view = self.resolve(saved, &mut HashMap::new()).await;
        self.notifier
            .notify(&view.transaction, view.creator.as_ref())
            .await;
        Ok(view)
    }

    /// Deletes a transaction `caller` created and reverses it out of the balance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Forbidden`, or `Store` if the delete fails.
    pub async fn delete(&self, caller: UserId, id: TransactionId) -> Result<(), TransactionError> {
        let existing = self.load_owned(caller, id).await?;

        self.store
            .delete_transaction(existing.id)
            .await
            .map_err(|err| gone_as_not_found(id, err))?;
        info!(transaction_id = %existing.id, "transaction deleted");

        self.ledger
            .post_logged(
                existing.related_object,
                Posting::Reverse,
                &Contribution::from(&existing),
            )
            .await;
        Ok(())
    }

    /// Lists transactions `caller` created, sent or received, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Store` if listing fails.
    pub async fn list(
        &self,
        caller: UserId,
        counterpart: Option<UserId>,
        related_object: Option<RelatedObject>,
    ) -> Result<Vec<TransactionView>, TransactionError> {
        let filter = TransactionFilter {
            participant: caller,
            counterpart,
            related_object,
        };
        let transactions = self.store.list_transactions(&filter).await?;

        let mut users = HashMap::new();
        let mut views = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            views.push(self.resolve(transaction, &mut users).await);
        }
        Ok(views)
    }

    async fn load_owned(
        &self,
        caller: UserId,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError> {
        let transaction = self
            .store
            .find_transaction(id)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        if transaction.creator_id != caller {
            warn!(transaction_id = %id, caller_id = %caller, "rejected change by non-creator");
            return Err(TransactionError::Forbidden {
                transaction_id: id,
                caller,
            });
        }
        Ok(transaction)
    }

    /// Re-posts a contribution whose reversal was not followed by a save.
    async fn restore(&self, related: RelatedObject, contribution: &Contribution) {
        if let Err(err) = self
            .ledger
            .post(related, Posting::Forward, contribution)
            .await
        {
            error!(
                error = %err,
                code = err.error_code(),
                "could not restore balance after failed transaction save"
            );
        }
    }

    async fn resolve(
        &self,
        transaction: Transaction,
        users: &mut HashMap<UserId, Option<User>>,
    ) -> TransactionView {
        let sender = self.user(transaction.sender_id, users).await;
        let recipient = self.user(transaction.recipient_id, users).await;
        let creator = self.user(transaction.creator_id, users).await;
        TransactionView {
            transaction,
            sender,
            recipient,
            creator,
        }
    }

    async fn user(
        &self,
        id: UserId,
        users: &mut HashMap<UserId, Option<User>>,
    ) -> Option<User> {
        if let Some(cached) = users.get(&id) {
            return cached.clone();
        }
        let user = match self.store.find_user(id).await {
            Ok(user) => user,
            Err(err) => {
                warn!(user_id = %id, error = %err, "could not resolve user");
                None
            }
        };
        users.insert(id, user.clone());
        user
    }
}

/// A row that vanished between load and write was deleted concurrently.
fn gone_as_not_found(id: TransactionId, err: StoreError) -> TransactionError {
    match err {
        StoreError::Missing(_) => TransactionError::NotFound(id),
        other => TransactionError::Store(other),
    }
}
