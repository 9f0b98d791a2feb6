//! Balance arithmetic.

use payup_shared::types::{Cents, FriendshipId, UserId};

use crate::transaction::Transaction;

/// Running balance between two friends.
///
/// Positive means the other user owes `positive_user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendshipData {
    /// Friendship id.
    pub id: FriendshipId,
    /// The user whose perspective the balance's sign follows.
    pub positive_user_id: UserId,
    /// Signed balance in cents.
    pub balance: Cents,
    /// Optimistic concurrency token, incremented on each write.
    pub version: i64,
}

/// Direction in which a transaction is posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posting {
    /// Apply the transaction's effect.
    Forward,
    /// Undo the transaction's effect.
    Reverse,
}

/// The parts of a transaction the balance depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    /// Paying user.
    pub sender_id: UserId,
    /// Benefiting user.
    pub recipient_id: UserId,
    /// Amount in cents.
    pub amount: Cents,
}

impl From<&Transaction> for Contribution {
    fn from(transaction: &Transaction) -> Self {
        Self {
            sender_id: transaction.sender_id,
            recipient_id: transaction.recipient_id,
            amount: transaction.amount,
        }
    }
}

impl FriendshipData {
    /// Creates a settled friendship at version 0.
    #[must_use]
    pub const fn new(id: FriendshipId, positive_user_id: UserId) -> Self {
        Self {
            id,
            positive_user_id,
            balance: 0,
            version: 0,
        }
    }

    /// Returns the change a forward posting makes.
    ///
    /// The recipient branch is checked first, so a self-transaction by the
    /// positive user lowers the balance.
    #[must_use]
    pub fn forward_delta(&self, contribution: &Contribution) -> Cents {
        if contribution.recipient_id == self.positive_user_id {
            -contribution.amount
        } else if contribution.sender_id == self.positive_user_id {
            contribution.amount
        } else {
            0
        }
    }

    /// Returns the change a posting in the given direction makes.
    #[must_use]
    pub fn delta(&self, posting: Posting, contribution: &Contribution) -> Cents {
        match posting {
            Posting::Forward => self.forward_delta(contribution),
            Posting::Reverse => -self.forward_delta(contribution),
        }
    }

    /// Applies a transaction's effect.
    pub fn apply_forward(&mut self, contribution: &Contribution) {
        self.apply(Posting::Forward, contribution);
    }

    /// Undoes a transaction's effect.
    pub fn apply_reverse(&mut self, contribution: &Contribution) {
        self.apply(Posting::Reverse, contribution);
    }

    /// Posts in the given direction.
    pub fn apply(&mut self, posting: Posting, contribution: &Contribution) {
        self.balance += self.delta(posting, contribution);
    }
}
