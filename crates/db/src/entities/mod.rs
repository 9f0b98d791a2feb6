//! `SeaORM` entities, one module per table.

pub mod device_tokens;
pub mod friendship_data;
pub mod transactions;
pub mod users;

pub mod prelude {
    //! Entity aliases.
    pub use super::device_tokens::Entity as DeviceTokens;
    pub use super::friendship_data::Entity as FriendshipData;
    pub use super::transactions::Entity as Transactions;
    pub use super::users::Entity as Users;
}
