//! Notification dispatch.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use payup_shared::{PushClient, PushPayload};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::error::NotificationError;
use super::message::{Audience, compose};
use crate::store::{DeviceTokenRepository, UserRepository};
use crate::transaction::Transaction;
use crate::user::User;

/// Used in titles when the creator cannot be found.
const UNKNOWN_CREATOR: &str = "Someone";

/// Tells the counterpart about a saved transaction.
pub trait Notifier: Send + Sync + 'static {
    /// Notifies about a transaction. Never fails and never blocks on delivery.
    ///
    /// `creator` is used for the title when already resolved.
    fn notify(
        &self,
        transaction: &Transaction,
        creator: Option<&User>,
    ) -> impl Future<Output = ()> + Send;
}

/// Sends a composed payload to devices.
pub trait PushGateway: Send + Sync + 'static {
    /// Delivers one payload.
    fn push(
        &self,
        payload: PushPayload,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

impl PushGateway for PushClient {
    async fn push(&self, payload: PushPayload) -> Result<(), NotificationError> {
        self.send(&payload).await?;
        Ok(())
    }
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    async fn notify(&self, _transaction: &Transaction, _creator: Option<&User>) {}
}

/// Resolves the audience's device and sends through a [`PushGateway`].
pub struct PushDispatcher<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
    timeout: Duration,
}

impl<S, G> PushDispatcher<S, G>
where
    S: DeviceTokenRepository + UserRepository,
    G: PushGateway,
{
    /// Creates a dispatcher. Each gateway call is abandoned after `timeout`.
    #[must_use]
    pub fn new(store: Arc<S>, gateway: Arc<G>, timeout: Duration) -> Self {
        Self {
            store,
            gateway,
            timeout,
        }
    }

    /// Composes the notification and spawns its delivery.
    ///
    /// Returns `Ok(None)` when the audience has no registered device.
    /// The returned handle completes once delivery succeeded, failed or
    /// timed out; the outcome is logged, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup fails.
    pub async fn dispatch(
        &self,
        transaction: &Transaction,
        creator: Option<&User>,
    ) -> Result<Option<JoinHandle<()>>, NotificationError> {
        let audience = Audience::of(transaction);

        let Some(device) = self
            .store
            .find_device_token(audience.user_id)
            .await
            .map_err(|source| NotificationError::TokenLookup {
                user_id: audience.user_id,
                source,
            })?
        else {
            debug!(
                transaction_id = %transaction.id,
                user_id = %audience.user_id,
                "no device registered, skipping notification"
            );
            return Ok(None);
        };

        let creator_name = match creator {
            Some(user) => user.name.clone(),
            None => self.creator_name(transaction).await?,
        };
        let payload = PushPayload::high_priority(
            device.token,
            compose(&creator_name, audience.action, transaction),
        );

        let gateway = Arc::clone(&self.gateway);
        let timeout = self.timeout;
        let transaction_id = transaction.id;
        Ok(Some(tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, gateway.push(payload)).await {
                Ok(result) => result,
                Err(_) => Err(NotificationError::Timeout(timeout)),
            };
            match outcome {
                Ok(()) => debug!(%transaction_id, "notification delivered"),
                Err(err) if err.is_unconfigured() => {
                    debug!(%transaction_id, "push gateway not configured, notification dropped");
                }
                Err(err) => error!(%transaction_id, error = %err, "notification failed"),
            }
        })))
    }

    async fn creator_name(&self, transaction: &Transaction) -> Result<String, NotificationError> {
        let user = self
            .store
            .find_user(transaction.creator_id)
            .await
            .map_err(|source| NotificationError::CreatorLookup {
                user_id: transaction.creator_id,
                source,
            })?;

        Ok(user.map_or_else(
            || {
                warn!(user_id = %transaction.creator_id, "creator not found for notification title");
                UNKNOWN_CREATOR.to_string()
            },
            |u| u.name,
        ))
    }
}

impl<S, G> Notifier for PushDispatcher<S, G>
where
    S: DeviceTokenRepository + UserRepository + 'static,
    G: PushGateway,
{
    async fn notify(&self, transaction: &Transaction, creator: Option<&User>) {
        if let Err(err) = self.dispatch(transaction, creator).await {
            warn!(transaction_id = %transaction.id, error = %err, "notification skipped");
        }
    }
}
