//! Property-based tests for balance arithmetic.
//!
//! - Reversing a forward posting restores the balance exactly
//! - A forward posting moves the balance by the amount, its negation, or nothing
//! - Editing equals deleting and re-creating

use proptest::prelude::*;

use super::balance::{Contribution, FriendshipData, Posting};
use crate::transaction::MAX_AMOUNT;
use payup_shared::types::{Cents, FriendshipId, UserId};

fn user() -> impl Strategy<Value = UserId> {
    (1i64..5).prop_map(UserId::new)
}

fn contribution() -> impl Strategy<Value = Contribution> {
    (user(), user(), 0..=MAX_AMOUNT).prop_map(|(sender_id, recipient_id, amount)| Contribution {
        sender_id,
        recipient_id,
        amount,
    })
}

fn friendship() -> impl Strategy<Value = FriendshipData> {
    (user(), -100_000_000i64..100_000_000i64).prop_map(|(positive, balance)| FriendshipData {
        balance,
        ..FriendshipData::new(FriendshipId::new(1), positive)
    })
}

proptest! {
    #[test]
    fn prop_reverse_undoes_forward(fd in friendship(), c in contribution()) {
        let mut posted = fd.clone();
        posted.apply_forward(&c);
        posted.apply_reverse(&c);
        prop_assert_eq!(posted, fd);
    }

    #[test]
    fn prop_forward_delta_is_signed_amount(fd in friendship(), c in contribution()) {
        let delta = fd.delta(Posting::Forward, &c);
        prop_assert!(delta == c.amount || delta == -c.amount || delta == 0);
        if c.sender_id != fd.positive_user_id && c.recipient_id != fd.positive_user_id {
            prop_assert_eq!(delta, 0);
        }
    }

    #[test]
    fn prop_edit_equals_recreate(
        fd in friendship(),
        before in contribution(),
        amount in 0..=MAX_AMOUNT,
    ) {
        let after = Contribution { amount, ..before };

        let mut edited = fd.clone();
        edited.apply_forward(&before);
        edited.apply_reverse(&before);
        edited.apply_forward(&after);

        let mut recreated = fd.clone();
        recreated.apply_forward(&after);

        prop_assert_eq!(edited, recreated);
    }

    #[test]
    fn prop_sequence_sums_deltas(fd in friendship(), cs in prop::collection::vec(contribution(), 0..20)) {
        let mut posted = fd.clone();
        let mut expected: Cents = fd.balance;
        for c in &cs {
            expected += posted.forward_delta(c);
            posted.apply_forward(c);
        }
        prop_assert_eq!(posted.balance, expected);

        for c in cs.iter().rev() {
            posted.apply_reverse(c);
        }
        prop_assert_eq!(posted.balance, fd.balance);
    }
}
