//! Transaction service errors.

use payup_shared::AppError;
use payup_shared::types::{TransactionId, UserId};
use thiserror::Error;

use super::validation::ValidationError;
use crate::store::StoreError;

/// Errors returned by `TransactionService`.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The submitted fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No live transaction has this id.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Only the creator may change or delete a transaction.
    #[error("User {caller} did not create transaction {transaction_id}")]
    Forbidden {
        /// Target transaction.
        transaction_id: TransactionId,
        /// Authenticated user.
        caller: UserId,
    },

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl TransactionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Forbidden { .. } => 403,
            Self::Store(_) => 500,
        }
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Validation(e) => Self::Validation {
                field: e.field(),
                message: e.to_string(),
            },
            TransactionError::NotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::Forbidden { .. } => Self::Forbidden(err.to_string()),
            TransactionError::Store(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_app_error() {
        let cases = [
            TransactionError::Validation(ValidationError::InvalidAmount),
            TransactionError::NotFound(TransactionId::new(1)),
            TransactionError::Forbidden {
                transaction_id: TransactionId::new(1),
                caller: UserId::new(2),
            },
            TransactionError::Store(StoreError::Database("down".into())),
        ];

        for err in cases {
            let status = err.http_status_code();
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_validation_keeps_field_and_message() {
        let app: AppError = TransactionError::from(ValidationError::InvalidRecipient).into();
        match app {
            AppError::Validation { field, message } => {
                assert_eq!(field, "recipientId");
                assert_eq!(message, "The transaction recipientId cannot be 0 or empty");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransactionError::NotFound(TransactionId::new(9)).error_code(),
            "TRANSACTION_NOT_FOUND"
        );
        assert_eq!(
            TransactionError::NotFound(TransactionId::new(9)).to_string(),
            "Transaction not found: 9"
        );
    }
}
