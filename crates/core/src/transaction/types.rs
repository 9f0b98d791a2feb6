//! Transaction types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use payup_shared::types::{Cents, FriendshipId, GroupId, TransactionId, UserId};
use serde::Deserialize;

use super::validation::ValidationError;
use crate::user::User;

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// The sender paid for something shared.
    Bill,
    /// The sender is repaying the recipient.
    Payback,
}

impl TransactionType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bill => "Bill",
            Self::Payback => "Payback",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bill" => Ok(Self::Bill),
            "Payback" => Ok(Self::Payback),
            _ => Err(ValidationError::InvalidType),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirmation state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Accepted by both sides.
    Confirmed,
    /// Awaiting the counterpart.
    Pending,
    /// Declined by the counterpart.
    Rejected,
}

impl TransactionStatus {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(Self::Confirmed),
            "Pending" => Ok(Self::Pending),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of object a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedObjectType {
    /// A group of users.
    Group,
    /// A two-person friendship with a running balance.
    Friendship,
}

impl RelatedObjectType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Friendship => "Friendship",
        }
    }
}

impl FromStr for RelatedObjectType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Group" => Ok(Self::Group),
            "Friendship" => Ok(Self::Friendship),
            _ => Err(ValidationError::InvalidRelatedObjectType),
        }
    }
}

impl fmt::Display for RelatedObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The object a transaction belongs to, with its id typed by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedObject {
    /// Belongs to a group; does not touch any balance.
    Group(GroupId),
    /// Belongs to a friendship; feeds its balance.
    Friendship(FriendshipId),
}

impl RelatedObject {
    /// Builds a related object from its kind and raw id.
    #[must_use]
    pub const fn new(kind: RelatedObjectType, id: i64) -> Self {
        match kind {
            RelatedObjectType::Group => Self::Group(GroupId::new(id)),
            RelatedObjectType::Friendship => Self::Friendship(FriendshipId::new(id)),
        }
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(self) -> RelatedObjectType {
        match self {
            Self::Group(_) => RelatedObjectType::Group,
            Self::Friendship(_) => RelatedObjectType::Friendship,
        }
    }

    /// Returns the raw id regardless of kind.
    #[must_use]
    pub const fn raw_id(self) -> i64 {
        match self {
            Self::Group(id) => id.get(),
            Self::Friendship(id) => id.get(),
        }
    }

    /// Returns the friendship id when this is a friendship.
    #[must_use]
    pub const fn friendship(self) -> Option<FriendshipId> {
        match self {
            Self::Friendship(id) => Some(id),
            Self::Group(_) => None,
        }
    }
}

/// Raw, unvalidated transaction fields as supplied by a client.
///
/// Enumerations stay textual so that unknown values surface as validation
/// errors with the right message rather than as deserialization failures.
/// Missing fields default to empty or zero and are rejected the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionDraft {
    /// `Bill` or `Payback`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `Confirmed`, `Pending` or `Rejected`.
    pub status: String,
    /// Amount in cents.
    pub amount: Cents,
    /// Free text.
    pub memo: String,
    /// Whether the transaction has been settled.
    pub is_settled: bool,
    /// Paying user.
    pub sender_id: i64,
    /// Benefiting user.
    pub recipient_id: i64,
    /// `Group` or `Friendship`.
    pub related_object_type: String,
    /// Group or friendship id.
    pub related_object_id: i64,
}

/// Validated fields of a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Kind of money movement.
    pub kind: TransactionType,
    /// Confirmation state.
    pub status: TransactionStatus,
    /// Amount in cents, within `0..=MAX_AMOUNT`.
    pub amount: Cents,
    /// At most `MAX_MEMO_CHARS` characters.
    pub memo: String,
    /// Whether the transaction has been settled.
    pub is_settled: bool,
    /// Paying user.
    pub sender_id: UserId,
    /// Benefiting user.
    pub recipient_id: UserId,
    /// Owning group or friendship.
    pub related_object: RelatedObject,
}

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Store-assigned id.
    pub id: TransactionId,
    /// Kind of money movement.
    pub kind: TransactionType,
    /// Confirmation state.
    pub status: TransactionStatus,
    /// Amount in cents.
    pub amount: Cents,
    /// Free text.
    pub memo: String,
    /// Whether the transaction has been settled.
    pub is_settled: bool,
    /// Paying user.
    pub sender_id: UserId,
    /// Benefiting user.
    pub recipient_id: UserId,
    /// Owning group or friendship.
    pub related_object: RelatedObject,
    /// Authenticated user who created it; the only one allowed to change it.
    pub creator_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Set once the transaction is deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Builds a stored transaction from validated fields.
    #[must_use]
    pub fn from_new(
        id: TransactionId,
        creator_id: UserId,
        new: NewTransaction,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: new.kind,
            status: new.status,
            amount: new.amount,
            memo: new.memo,
            is_settled: new.is_settled,
            sender_id: new.sender_id,
            recipient_id: new.recipient_id,
            related_object: new.related_object,
            creator_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Returns the transaction's fields in raw form, for re-validation.
    #[must_use]
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            kind: self.kind.as_str().to_string(),
            status: self.status.as_str().to_string(),
            amount: self.amount,
            memo: self.memo.clone(),
            is_settled: self.is_settled,
            sender_id: self.sender_id.get(),
            recipient_id: self.recipient_id.get(),
            related_object_type: self.related_object.kind().as_str().to_string(),
            related_object_id: self.related_object.raw_id(),
        }
    }

    /// Returns true if the user is the creator, sender or recipient.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.creator_id == user_id || self.sender_id == user_id || self.recipient_id == user_id
    }

    /// Returns true once deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Partial update. Absent fields keep their stored value.
///
/// Only the type, amount and memo may change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    /// New type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// New amount in cents.
    #[serde(default)]
    pub amount: Option<Cents>,
    /// New memo.
    #[serde(default)]
    pub memo: Option<String>,
}

impl TransactionPatch {
    /// Overlays the present fields onto a draft.
    pub fn merge_into(&self, draft: &mut TransactionDraft) {
        if let Some(kind) = &self.kind {
            draft.kind.clone_from(kind);
        }
        if let Some(amount) = self.amount {
            draft.amount = amount;
        }
        if let Some(memo) = &self.memo {
            draft.memo.clone_from(memo);
        }
    }
}

/// Listing criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only transactions this user created, sent or received.
    pub participant: UserId,
    /// Only transactions between `participant` and this user.
    pub counterpart: Option<UserId>,
    /// Only transactions belonging to this object.
    pub related_object: Option<RelatedObject>,
}

impl TransactionFilter {
    /// Lists everything involving a user.
    #[must_use]
    pub const fn for_participant(participant: UserId) -> Self {
        Self {
            participant,
            counterpart: None,
            related_object: None,
        }
    }

    /// Returns true if a transaction passes the filter.
    ///
    /// Deleted transactions never match.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if transaction.is_deleted() || !transaction.involves(self.participant) {
            return false;
        }
        if let Some(counterpart) = self.counterpart {
            let (sender, recipient) = (transaction.sender_id, transaction.recipient_id);
            let between = (sender == self.participant && recipient == counterpart)
                || (sender == counterpart && recipient == self.participant);
            if !between {
                return false;
            }
        }
        self.related_object
            .is_none_or(|related| transaction.related_object == related)
    }
}

/// A transaction with its participants resolved for display.
///
/// Users that cannot be found are left as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionView {
    /// The transaction.
    pub transaction: Transaction,
    /// Resolved sender.
    pub sender: Option<User>,
    /// Resolved recipient.
    pub recipient: Option<User>,
    /// Resolved creator.
    pub creator: Option<User>,
}
