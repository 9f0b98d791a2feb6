//! Transaction persistence.

use chrono::Utc;
use payup_core::store::{StoreError, TransactionRepository};
use payup_core::transaction::{
    NewTransaction, RelatedObject, Transaction, TransactionFilter, ValidationError,
};
use payup_shared::types::{TransactionId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{PgStore, db_error};
use crate::entities::transactions;

impl TransactionRepository for PgStore {
    async fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let model = transactions::Entity::find_by_id(id.get())
            .filter(transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(to_domain).transpose()
    }

    async fn create_transaction(
        &self,
        creator_id: UserId,
        new: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let now = Utc::now().into();
        let active_model = transactions::ActiveModel {
            id: NotSet,
            kind: Set(new.kind.as_str().to_string()),
            status: Set(new.status.as_str().to_string()),
            amount: Set(new.amount),
            memo: Set(new.memo),
            is_settled: Set(new.is_settled),
            sender_id: Set(new.sender_id.get()),
            recipient_id: Set(new.recipient_id.get()),
            related_object_type: Set(new.related_object.kind().as_str().to_string()),
            related_object_id: Set(new.related_object.raw_id()),
            creator_id: Set(creator_id.get()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        to_domain(model)
    }

    async fn save_transaction(&self, transaction: &Transaction) -> Result<Transaction, StoreError> {
        let model = transactions::Entity::find_by_id(transaction.id.get())
            .filter(transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| StoreError::Missing(format!("transaction {}", transaction.id)))?;

        let mut active_model = model.into_active_model();
        active_model.kind = Set(transaction.kind.as_str().to_string());
        active_model.amount = Set(transaction.amount);
        active_model.memo = Set(transaction.memo.clone());
        active_model.updated_at = Set(Utc::now().into());

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        to_domain(model)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError> {
        let now = Utc::now();
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::DeletedAt, Expr::value(now))
            .col_expr(transactions::Column::UpdatedAt, Expr::value(now))
            .filter(transactions::Column::Id.eq(id.get()))
            .filter(transactions::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(StoreError::Missing(format!("transaction {id}")));
        }
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let models = transactions::Entity::find()
            .filter(condition(filter))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        models.into_iter().map(to_domain).collect()
    }
}

/// SQL equivalent of `TransactionFilter::matches`.
fn condition(filter: &TransactionFilter) -> Condition {
    let me = filter.participant.get();
    let mut condition = Condition::all()
        .add(transactions::Column::DeletedAt.is_null())
        .add(
            Condition::any()
                .add(transactions::Column::CreatorId.eq(me))
                .add(transactions::Column::SenderId.eq(me))
                .add(transactions::Column::RecipientId.eq(me)),
        );

    if let Some(counterpart) = filter.counterpart {
        let other = counterpart.get();
        condition = condition.add(
            Condition::any()
                .add(
                    Condition::all()
                        .add(transactions::Column::SenderId.eq(me))
                        .add(transactions::Column::RecipientId.eq(other)),
                )
                .add(
                    Condition::all()
                        .add(transactions::Column::SenderId.eq(other))
                        .add(transactions::Column::RecipientId.eq(me)),
                ),
        );
    }

    if let Some(related) = filter.related_object {
        condition = condition
            .add(transactions::Column::RelatedObjectType.eq(related.kind().as_str()))
            .add(transactions::Column::RelatedObjectId.eq(related.raw_id()));
    }

    condition
}

fn to_domain(model: transactions::Model) -> Result<Transaction, StoreError> {
    let id = model.id;
    let corrupt = |err: ValidationError| StoreError::Corrupt(format!("transaction {id}: {err}"));

    Ok(Transaction {
        id: TransactionId::new(id),
        kind: model.kind.parse().map_err(corrupt)?,
        status: model.status.parse().map_err(corrupt)?,
        amount: model.amount,
        memo: model.memo,
        is_settled: model.is_settled,
        sender_id: UserId::new(model.sender_id),
        recipient_id: UserId::new(model.recipient_id),
        related_object: RelatedObject::new(
            model.related_object_type.parse().map_err(corrupt)?,
            model.related_object_id,
        ),
        creator_id: UserId::new(model.creator_id),
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
        deleted_at: model.deleted_at.map(|at| at.to_utc()),
    })
}
