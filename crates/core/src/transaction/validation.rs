//! Transaction validation.
//!
//! Checks run in a fixed order and stop at the first failure, so a client
//! always sees the earliest problem in this sequence: type, status, amount,
//! memo, sender, recipient, related object id, related object type.

use payup_shared::types::{Cents, UserId};
use thiserror::Error;

use super::types::{
    NewTransaction, RelatedObject, RelatedObjectType, TransactionDraft, TransactionStatus,
    TransactionType,
};

/// Largest accepted amount, in cents ($10,000.00).
pub const MAX_AMOUNT: Cents = 1_000_000;

/// Longest accepted memo, in characters.
pub const MAX_MEMO_CHARS: usize = 140;

/// First rule a transaction draft broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Type is not `Bill` or `Payback`.
    #[error("The transaction type is invalid")]
    InvalidType,
    /// Status is not `Confirmed`, `Pending` or `Rejected`.
    #[error("The transaction status is invalid")]
    InvalidStatus,
    /// Amount is negative or above `MAX_AMOUNT`.
    #[error("The transaction amount is out of range")]
    InvalidAmount,
    /// Memo is longer than `MAX_MEMO_CHARS`.
    #[error("The transaction memo must be less than or equal to 140 characters")]
    InvalidMemo,
    /// Sender id is zero.
    #[error("The transaction senderId cannot be 0 or empty")]
    InvalidSender,
    /// Recipient id is zero.
    #[error("The transaction recipientId cannot be 0 or empty")]
    InvalidRecipient,
    /// Related object id is zero.
    #[error("The transaction relatedObjectId cannot be 0 or empty")]
    InvalidRelatedObject,
    /// Related object type is not `Group` or `Friendship`.
    #[error("The transaction must have a valid relatedObjectType")]
    InvalidRelatedObjectType,
}

impl ValidationError {
    /// Returns the wire name of the offending field.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidType => "type",
            Self::InvalidStatus => "status",
            Self::InvalidAmount => "amount",
            Self::InvalidMemo => "memo",
            Self::InvalidSender => "senderId",
            Self::InvalidRecipient => "recipientId",
            Self::InvalidRelatedObject => "relatedObjectId",
            Self::InvalidRelatedObjectType => "relatedObjectType",
        }
    }
}

/// Validates a draft.
///
/// # Errors
///
/// Returns the first `ValidationError` in check order.
pub fn validate(draft: &TransactionDraft) -> Result<NewTransaction, ValidationError> {
    let kind: TransactionType = draft.kind.parse()?;
    let status: TransactionStatus = draft.status.parse()?;

    if !(0..=MAX_AMOUNT).contains(&draft.amount) {
        return Err(ValidationError::InvalidAmount);
    }
    if draft.memo.chars().count() > MAX_MEMO_CHARS {
        return Err(ValidationError::InvalidMemo);
    }

    let sender_id = UserId::new(draft.sender_id);
    if sender_id.is_unset() {
        return Err(ValidationError::InvalidSender);
    }
    let recipient_id = UserId::new(draft.recipient_id);
    if recipient_id.is_unset() {
        return Err(ValidationError::InvalidRecipient);
    }
    if draft.related_object_id == 0 {
        return Err(ValidationError::InvalidRelatedObject);
    }
    let related_kind: RelatedObjectType = draft.related_object_type.parse()?;

    Ok(NewTransaction {
        kind,
        status,
        amount: draft.amount,
        memo: draft.memo.clone(),
        is_settled: draft.is_settled,
        sender_id,
        recipient_id,
        related_object: RelatedObject::new(related_kind, draft.related_object_id),
    })
}
