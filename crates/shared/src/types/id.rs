//! Typed IDs for type-safe entity references.
//!
//! Records are keyed by database-assigned integers. Wrapping them prevents
//! accidentally passing a `UserId` where a `FriendshipId` is expected. The raw
//! value `0` is the "unset" identifier a client sends when it omits a field.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Returns true if this is the unset identifier `0`.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(
    FriendshipId,
    "Unique identifier for a friendship and its balance aggregate."
);
typed_id!(GroupId, "Unique identifier for a group.");
typed_id!(DeviceTokenId, "Unique identifier for a registered device token.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_roundtrips_raw_value() {
        let id = UserId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_typed_id_unset() {
        assert!(UserId::default().is_unset());
        assert!(TransactionId::new(0).is_unset());
        assert!(!FriendshipId::new(7).is_unset());
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(GroupId::new(15).to_string(), "15");
    }

    #[test]
    fn test_typed_id_from_str() {
        assert_eq!(TransactionId::from_str("123").unwrap(), TransactionId::new(123));
        assert!(TransactionId::from_str("abc").is_err());
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: UserId = serde_json::from_str("9").unwrap();
        assert_eq!(back, UserId::new(9));
    }
}
