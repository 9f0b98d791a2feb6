//! Postgres implementations of the core repository traits.
//!
//! One module per table. All of them hang off [`PgStore`], so a single value
//! satisfies `payup_core::store::Store`.

mod device_token;
mod friendship;
mod transaction;
mod user;

use payup_core::store::StoreError;
use sea_orm::{DatabaseConnection, DbErr};

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabaseConnection,
}

impl PgStore {
    /// Creates a store over a connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn db_error(err: DbErr) -> StoreError {
    tracing::error!(error = %err, "database query failed");
    StoreError::Database(err.to_string())
}
