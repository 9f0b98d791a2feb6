//! Device token lookups.

use payup_core::store::{DeviceTokenRepository, StoreError};
use payup_core::user::DeviceToken;
use payup_shared::types::{DeviceTokenId, UserId};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{PgStore, db_error};
use crate::entities::device_tokens;

impl DeviceTokenRepository for PgStore {
    /// Returns the most recently registered token.
    async fn find_device_token(&self, user_id: UserId) -> Result<Option<DeviceToken>, StoreError> {
        let model = device_tokens::Entity::find()
            .filter(device_tokens::Column::UserId.eq(user_id.get()))
            .order_by_desc(device_tokens::Column::CreatedAt)
            .order_by_desc(device_tokens::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| DeviceToken {
            id: DeviceTokenId::new(m.id),
            user_id: UserId::new(m.user_id),
            token: m.token,
        }))
    }
}
