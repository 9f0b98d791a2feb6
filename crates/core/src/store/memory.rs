//! In-process store.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use payup_shared::types::{DeviceTokenId, FriendshipId, TransactionId, UserId};
use tokio::sync::Mutex;

use super::{
    DeviceTokenRepository, FriendshipRepository, StoreError, TransactionRepository,
    UserRepository,
};
use crate::ledger::FriendshipData;
use crate::transaction::{NewTransaction, Transaction, TransactionFilter};
use crate::user::{DeviceToken, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    friendships: HashMap<FriendshipId, FriendshipData>,
    device_tokens: Vec<DeviceToken>,
    transactions: BTreeMap<TransactionId, Transaction>,
    last_transaction_id: i64,
}

/// Store holding everything in memory behind one lock.
///
/// Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub async fn insert_user(&self, user: User) {
        self.tables.lock().await.users.insert(user.id, user);
    }

    /// Adds or replaces a friendship balance.
    pub async fn insert_friendship(&self, friendship: FriendshipData) {
        self.tables
            .lock()
            .await
            .friendships
            .insert(friendship.id, friendship);
    }

    /// Registers a device token for a user.
    pub async fn insert_device_token(&self, user_id: UserId, token: impl Into<String>) {
        let mut tables = self.tables.lock().await;
        let id = DeviceTokenId::new(i64::try_from(tables.device_tokens.len()).unwrap_or(i64::MAX) + 1);
        tables.device_tokens.push(DeviceToken {
            id,
            user_id,
            token: token.into(),
        });
    }

    /// Returns the current friendship balance, bypassing the repository traits.
    pub async fn friendship(&self, id: FriendshipId) -> Option<FriendshipData> {
        self.tables.lock().await.friendships.get(&id).cloned()
    }

    /// Returns a transaction even if it was deleted.
    pub async fn raw_transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.tables.lock().await.transactions.get(&id).cloned()
    }
}

impl TransactionRepository for InMemoryStore {
    async fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .transactions
            .get(&id)
            .filter(|t| !t.is_deleted())
            .cloned())
    }

    async fn create_transaction(
        &self,
        creator_id: UserId,
        new: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.last_transaction_id += 1;
        let id = TransactionId::new(tables.last_transaction_id);
        let transaction = Transaction::from_new(id, creator_id, new, Utc::now());
        tables.transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    async fn save_transaction(&self, transaction: &Transaction) -> Result<Transaction, StoreError> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .transactions
            .get_mut(&transaction.id)
            .filter(|t| !t.is_deleted())
            .ok_or_else(|| StoreError::Missing(format!("transaction {}", transaction.id)))?;

        stored.kind = transaction.kind;
        stored.amount = transaction.amount;
        stored.memo.clone_from(&transaction.memo);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .transactions
            .get_mut(&id)
            .filter(|t| !t.is_deleted())
            .ok_or_else(|| StoreError::Missing(format!("transaction {id}")))?;

        stored.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let tables = self.tables.lock().await;
        let mut found: Vec<Transaction> = tables
            .transactions
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }
}

impl FriendshipRepository for InMemoryStore {
    async fn find_friendship(&self, id: FriendshipId) -> Result<Option<FriendshipData>, StoreError> {
        Ok(self.tables.lock().await.friendships.get(&id).cloned())
    }

    async fn save_friendship(
        &self,
        friendship: &FriendshipData,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(stored) = tables.friendships.get_mut(&friendship.id) else {
            return Err(StoreError::Missing(format!("friendship {}", friendship.id)));
        };
        if stored.version != expected_version {
            return Ok(false);
        }

        stored.balance = friendship.balance;
        stored.version = expected_version + 1;
        Ok(true)
    }
}

impl DeviceTokenRepository for InMemoryStore {
    /// Returns the most recently registered token.
    async fn find_device_token(&self, user_id: UserId) -> Result<Option<DeviceToken>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .device_tokens
            .iter()
            .rev()
            .find(|t| t.user_id == user_id)
            .cloned())
    }
}

impl UserRepository for InMemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{RelatedObject, TransactionStatus, TransactionType};
    use payup_shared::types::GroupId;

    fn new_transaction(sender: i64, recipient: i64) -> NewTransaction {
        NewTransaction {
            kind: TransactionType::Bill,
            status: TransactionStatus::Confirmed,
            amount: 250,
            memo: "coffee".to_string(),
            is_settled: false,
            sender_id: UserId::new(sender),
            recipient_id: UserId::new(recipient),
            related_object: RelatedObject::Group(GroupId::new(1)),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = InMemoryStore::new();
        let a = store
            .create_transaction(UserId::new(1), new_transaction(1, 2))
            .await
            .unwrap();
        let b = store
            .create_transaction(UserId::new(1), new_transaction(1, 2))
            .await
            .unwrap();

        assert_eq!(a.id, TransactionId::new(1));
        assert_eq!(b.id, TransactionId::new(2));
        assert_eq!(a.creator_id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_deleted_transactions_are_hidden() {
        let store = InMemoryStore::new();
        let tx = store
            .create_transaction(UserId::new(1), new_transaction(1, 2))
            .await
            .unwrap();

        store.delete_transaction(tx.id).await.unwrap();

        assert!(store.find_transaction(tx.id).await.unwrap().is_none());
        assert!(store.raw_transaction(tx.id).await.unwrap().is_deleted());
        let listed = store
            .list_transactions(&TransactionFilter::for_participant(UserId::new(1)))
            .await
            .unwrap();
        assert!(listed.is_empty());
        assert!(matches!(
            store.delete_transaction(tx.id).await,
            Err(StoreError::Missing(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryStore::new();
        for _ in 0..3 {
            store
                .create_transaction(UserId::new(1), new_transaction(1, 2))
                .await
                .unwrap();
        }

        let listed = store
            .list_transactions(&TransactionFilter::for_participant(UserId::new(2)))
            .await
            .unwrap();

        let ids: Vec<i64> = listed.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_save_friendship_rejects_stale_version() {
        let store = InMemoryStore::new();
        store
            .insert_friendship(FriendshipData::new(FriendshipId::new(1), UserId::new(1)))
            .await;

        let mut fd = store.friendship(FriendshipId::new(1)).await.unwrap();
        fd.balance = 100;
        assert!(store.save_friendship(&fd, 0).await.unwrap());

        fd.balance = 200;
        assert!(!store.save_friendship(&fd, 0).await.unwrap());

        let stored = store.friendship(FriendshipId::new(1)).await.unwrap();
        assert_eq!(stored.balance, 100);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_device_token_lookup() {
        let store = InMemoryStore::new();
        store.insert_device_token(UserId::new(2), "tok-2").await;

        let token = store.find_device_token(UserId::new(2)).await.unwrap();
        assert_eq!(token.map(|t| t.token).as_deref(), Some("tok-2"));
        assert!(store.find_device_token(UserId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_device_token_lookup_prefers_newest() {
        let store = InMemoryStore::new();
        store.insert_device_token(UserId::new(2), "old-phone").await;
        store.insert_device_token(UserId::new(3), "other-user").await;
        store.insert_device_token(UserId::new(2), "new-phone").await;

        let token = store.find_device_token(UserId::new(2)).await.unwrap();
        assert_eq!(token.map(|t| t.token).as_deref(), Some("new-phone"));
    }
}
