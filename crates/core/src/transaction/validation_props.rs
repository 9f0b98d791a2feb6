//! Property-based tests for transaction validation.
//!
//! - Amounts are accepted exactly within `0..=MAX_AMOUNT`
//! - Memos are accepted exactly up to `MAX_MEMO_CHARS` characters
//! - A stored transaction always re-validates to the same fields

use proptest::prelude::*;

use super::types::{Transaction, TransactionDraft};
use super::validation::{MAX_AMOUNT, MAX_MEMO_CHARS, ValidationError, validate};
use payup_shared::types::{TransactionId, UserId};

fn base_draft() -> TransactionDraft {
    TransactionDraft {
        kind: "Payback".to_string(),
        status: "Pending".to_string(),
        amount: 100,
        memo: String::new(),
        is_settled: false,
        sender_id: 3,
        recipient_id: 4,
        related_object_type: "Group".to_string(),
        related_object_id: 9,
    }
}

fn id_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..0i64, 1i64..i64::MAX]
}

proptest! {
    #[test]
    fn prop_amount_range(amount in any::<i64>()) {
        let draft = TransactionDraft { amount, ..base_draft() };
        let result = validate(&draft);
        if (0..=MAX_AMOUNT).contains(&amount) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(ValidationError::InvalidAmount));
        }
    }

    #[test]
    fn prop_memo_length(memo in "\\PC{0,200}") {
        let draft = TransactionDraft { memo: memo.clone(), ..base_draft() };
        let result = validate(&draft);
        if memo.chars().count() <= MAX_MEMO_CHARS {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(ValidationError::InvalidMemo));
        }
    }

    #[test]
    fn prop_nonzero_ids_accepted(
        sender in id_strategy(),
        recipient in id_strategy(),
        related in id_strategy(),
    ) {
        let draft = TransactionDraft {
            sender_id: sender,
            recipient_id: recipient,
            related_object_id: related,
            ..base_draft()
        };
        prop_assert!(validate(&draft).is_ok());
    }

    #[test]
    fn prop_stored_transaction_revalidates(amount in 0..=MAX_AMOUNT, memo in "[a-z ]{0,140}") {
        let draft = TransactionDraft { amount, memo, ..base_draft() };
        let new = validate(&draft).unwrap();
        let stored = Transaction::from_new(
            TransactionId::new(1),
            UserId::new(3),
            new.clone(),
            chrono::Utc::now(),
        );

        prop_assert_eq!(validate(&stored.to_draft()), Ok(new));
    }
}
