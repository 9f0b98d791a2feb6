//! `SeaORM` Entity for friendship_data table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "friendship_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub positive_user_id: i64,
    pub balance: i64,
    pub version: i64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PositiveUserId",
        to = "super::users::Column::Id"
    )]
    PositiveUser,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PositiveUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
