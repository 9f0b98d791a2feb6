//! Friendship balances with version-checked writes.

use chrono::Utc;
use payup_core::ledger::FriendshipData;
use payup_core::store::{FriendshipRepository, StoreError};
use payup_shared::types::{FriendshipId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::{PgStore, db_error};
use crate::entities::friendship_data;

impl FriendshipRepository for PgStore {
    async fn find_friendship(&self, id: FriendshipId) -> Result<Option<FriendshipData>, StoreError> {
        let model = friendship_data::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| FriendshipData {
            id: FriendshipId::new(m.id),
            positive_user_id: UserId::new(m.positive_user_id),
            balance: m.balance,
            version: m.version,
        }))
    }

    async fn save_friendship(
        &self,
        friendship: &FriendshipData,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        let result = friendship_data::Entity::update_many()
            .col_expr(
                friendship_data::Column::Balance,
                Expr::value(friendship.balance),
            )
            .col_expr(
                friendship_data::Column::Version,
                Expr::value(expected_version + 1),
            )
            .col_expr(friendship_data::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(friendship_data::Column::Id.eq(friendship.id.get()))
            .filter(friendship_data::Column::Version.eq(expected_version))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected == 1)
    }
}
