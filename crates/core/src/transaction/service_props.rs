//! Property-based tests for TransactionService.
//!
//! - After any sequence of creates, edits and deletes, the friendship balance
//!   equals the sum of the forward deltas of the live transactions

use std::sync::Arc;

use proptest::prelude::*;

use super::service::TransactionService;
use super::types::{TransactionDraft, TransactionFilter, TransactionPatch};
use crate::ledger::{Contribution, FriendshipData};
use crate::notification::DisabledNotifier;
use crate::store::{InMemoryStore, TransactionRepository};
use payup_shared::types::{Cents, FriendshipId, UserId};

const FRIENDSHIP: FriendshipId = FriendshipId::new(1);

#[derive(Debug, Clone)]
enum Op {
    Create {
        creator: i64,
        sender: i64,
        recipient: i64,
        amount: Cents,
    },
    Edit {
        pick: usize,
        amount: Cents,
    },
    Delete {
        pick: usize,
    },
}

fn user() -> impl Strategy<Value = i64> {
    1i64..=3
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (user(), user(), user(), 0i64..=10_000).prop_map(|(creator, sender, recipient, amount)| {
            Op::Create { creator, sender, recipient, amount }
        }),
        2 => (any::<usize>(), 0i64..=10_000).prop_map(|(pick, amount)| Op::Edit { pick, amount }),
        1 => any::<usize>().prop_map(|pick| Op::Delete { pick }),
    ]
}

fn draft(sender: i64, recipient: i64, amount: Cents) -> TransactionDraft {
    TransactionDraft {
        kind: "Bill".to_string(),
        status: "Confirmed".to_string(),
        amount,
        memo: String::new(),
        is_settled: false,
        sender_id: sender,
        recipient_id: recipient,
        related_object_type: "Friendship".to_string(),
        related_object_id: FRIENDSHIP.get(),
    }
}

async fn run(ops: Vec<Op>) -> (Cents, Cents) {
    let store = Arc::new(InMemoryStore::new());
    store
        .insert_friendship(FriendshipData::new(FRIENDSHIP, UserId::new(1)))
        .await;
    let service = TransactionService::new(Arc::clone(&store), Arc::new(DisabledNotifier));
    let mut live = Vec::new();

    for op in ops {
        match op {
            Op::Create {
                creator,
                sender,
                recipient,
                amount,
            } => {
                let view = service
                    .create(UserId::new(creator), &draft(sender, recipient, amount))
                    .await
                    .unwrap();
                live.push(view.transaction);
            }
            Op::Edit { pick, amount } if !live.is_empty() => {
                let target = &live[pick % live.len()];
                let patch = TransactionPatch {
                    amount: Some(amount),
                    ..TransactionPatch::default()
                };
                service
                    .update(target.creator_id, target.id, &patch)
                    .await
                    .unwrap();
            }
            Op::Delete { pick } if !live.is_empty() => {
                let target = live.remove(pick % live.len());
                service.delete(target.creator_id, target.id).await.unwrap();
            }
            _ => {}
        }
    }

    let friendship = store.friendship(FRIENDSHIP).await.unwrap();
    let mut expected = 0;
    for creator in 1..=3 {
        let filter = TransactionFilter::for_participant(UserId::new(creator));
        for t in store.list_transactions(&filter).await.unwrap() {
            if t.creator_id == UserId::new(creator) {
                expected += friendship.forward_delta(&Contribution::from(&t));
            }
        }
    }
    (friendship.balance, expected)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balance_matches_live_transactions(ops in prop::collection::vec(op(), 0..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (balance, expected) = runtime.block_on(run(ops));
        prop_assert_eq!(balance, expected);
    }
}
