//! Users and their registered devices.

use payup_shared::types::{DeviceTokenId, UserId};
use serde::Serialize;

/// A registered user, as shown alongside transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id.
    pub id: UserId,
    /// Display name used in notification titles.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// A push token registered by one of a user's devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceToken {
    /// Token id.
    pub id: DeviceTokenId,
    /// Owning user.
    pub user_id: UserId,
    /// Gateway-issued registration token.
    pub token: String,
}
