//! User lookups.

use payup_core::store::{StoreError, UserRepository};
use payup_core::user::User;
use payup_shared::types::UserId;
use sea_orm::EntityTrait;

use super::{PgStore, db_error};
use crate::entities::users;

impl UserRepository for PgStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let model = users::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| User {
            id: UserId::new(m.id),
            name: m.name,
            email: m.email,
        }))
    }
}
