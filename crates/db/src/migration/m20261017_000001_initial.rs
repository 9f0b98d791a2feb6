//! Initial schema: users, device tokens, friendship balances and transactions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS transactions, friendship_data, device_tokens, users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
CREATE TABLE users (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE device_tokens (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_device_tokens_user_token UNIQUE (user_id, token)
);

CREATE INDEX idx_device_tokens_user ON device_tokens(user_id, created_at DESC);

-- Balance is signed, from the positive user's point of view.
-- version guards concurrent read-modify-write cycles.
CREATE TABLE friendship_data (
    id BIGSERIAL PRIMARY KEY,
    positive_user_id BIGINT NOT NULL REFERENCES users(id),
    balance BIGINT NOT NULL DEFAULT 0,
    version BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE transactions (
    id BIGSERIAL PRIMARY KEY,
    type VARCHAR(16) NOT NULL,
    status VARCHAR(16) NOT NULL,
    amount BIGINT NOT NULL,
    memo VARCHAR(140) NOT NULL DEFAULT '',
    is_settled BOOLEAN NOT NULL DEFAULT false,
    sender_id BIGINT NOT NULL,
    recipient_id BIGINT NOT NULL,
    related_object_type VARCHAR(16) NOT NULL,
    related_object_id BIGINT NOT NULL,
    creator_id BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ,
    CONSTRAINT chk_transactions_type CHECK (type IN ('Bill', 'Payback')),
    CONSTRAINT chk_transactions_status CHECK (status IN ('Confirmed', 'Pending', 'Rejected')),
    CONSTRAINT chk_transactions_amount CHECK (amount BETWEEN 0 AND 1000000),
    CONSTRAINT chk_transactions_related_type CHECK (related_object_type IN ('Group', 'Friendship'))
);

-- Listing by participant, newest first
CREATE INDEX idx_transactions_creator ON transactions(creator_id, created_at DESC) WHERE deleted_at IS NULL;
CREATE INDEX idx_transactions_sender ON transactions(sender_id, created_at DESC) WHERE deleted_at IS NULL;
CREATE INDEX idx_transactions_recipient ON transactions(recipient_id, created_at DESC) WHERE deleted_at IS NULL;
CREATE INDEX idx_transactions_related ON transactions(related_object_type, related_object_id) WHERE deleted_at IS NULL;
";
