//! Who gets told, and what they read.

use std::fmt;

use payup_shared::PushNotification;
use payup_shared::types::{UserId, format_cents};

use crate::transaction::Transaction;

/// Verb used in the title, from the creator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    /// The creator paid.
    Sent,
    /// The creator was paid.
    Received,
}

impl NotifyAction {
    /// Returns the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for NotifyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The counterpart to notify about a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Audience {
    /// User to notify.
    pub user_id: UserId,
    /// What the creator did.
    pub action: NotifyAction,
}

impl Audience {
    /// Picks the counterpart of the creator.
    ///
    /// A creator who sent the money notifies the recipient; anyone else
    /// notifies the sender.
    #[must_use]
    pub fn of(transaction: &Transaction) -> Self {
        if transaction.creator_id == transaction.sender_id {
            Self {
                user_id: transaction.recipient_id,
                action: NotifyAction::Sent,
            }
        } else {
            Self {
                user_id: transaction.sender_id,
                action: NotifyAction::Received,
            }
        }
    }
}

/// Builds the visible notification: `"<creator> <sent|received> $x.xx"` over the memo.
#[must_use]
pub fn compose(
    creator_name: &str,
    action: NotifyAction,
    transaction: &Transaction,
) -> PushNotification {
    PushNotification {
        title: format!(
            "{creator_name} {action} {}",
            format_cents(transaction.amount)
        ),
        body: transaction.memo.clone(),
    }
}
