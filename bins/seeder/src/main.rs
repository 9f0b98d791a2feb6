//! Demo data seeder for PayUp development.
//!
//! Seeds two users, the friendship balance between them and a device token
//! for the second user. Re-running skips anything already present. If
//! `PAYUP__JWT__SECRET` is set, prints a bearer token for each user.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use payup_db::entities::{device_tokens, friendship_data, users};
use payup_shared::types::UserId;
use payup_shared::{JwtConfig, JwtService};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

const DEMO_USERS: [(&str, &str); 2] = [
    ("Alice Demo", "alice@payup.dev"),
    ("Bob Demo", "bob@payup.dev"),
];

const DEMO_DEVICE_TOKEN: &str = "demo-device-token-bob";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = payup_db::connect(&database_url).await?;

    println!("Seeding users...");
    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for (name, email) in DEMO_USERS {
        ids.push(seed_user(&db, name, email).await?);
    }
    let (alice, bob) = (ids[0], ids[1]);

    println!("Seeding friendship...");
    let friendship_id = seed_friendship(&db, alice).await?;

    println!("Seeding device token...");
    seed_device_token(&db, bob).await?;

    println!("Seeding complete!");
    println!("  alice = {alice}, bob = {bob}, friendship = {friendship_id}");

    if let Ok(secret) = std::env::var("PAYUP__JWT__SECRET") {
        let jwt = JwtService::new(JwtConfig {
            secret,
            access_token_expires_minutes: 24 * 60,
        });
        for (label, id) in [("alice", alice), ("bob", bob)] {
            let token = jwt.generate_access_token(UserId::new(id))?;
            println!("  {label} token: {token}");
        }
    }

    Ok(())
}

async fn seed_user(db: &DatabaseConnection, name: &str, email: &str) -> anyhow::Result<i64> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
    {
        println!("  {email} already exists, skipping...");
        return Ok(existing.id);
    }

    let user = users::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    println!("  Created {email}");
    Ok(user.id)
}

/// The first user is the positive side of the friendship.
async fn seed_friendship(db: &DatabaseConnection, positive_user_id: i64) -> anyhow::Result<i64> {
    if let Some(existing) = friendship_data::Entity::find()
        .filter(friendship_data::Column::PositiveUserId.eq(positive_user_id))
        .one(db)
        .await?
    {
        println!("  Friendship already exists, skipping...");
        return Ok(existing.id);
    }

    let friendship = friendship_data::ActiveModel {
        id: NotSet,
        positive_user_id: Set(positive_user_id),
        balance: Set(0),
        version: Set(0),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    println!("  Created friendship {}", friendship.id);
    Ok(friendship.id)
}

async fn seed_device_token(db: &DatabaseConnection, user_id: i64) -> anyhow::Result<()> {
    let exists = device_tokens::Entity::find()
        .filter(device_tokens::Column::UserId.eq(user_id))
        .filter(device_tokens::Column::Token.eq(DEMO_DEVICE_TOKEN))
        .one(db)
        .await?
        .is_some();
    if exists {
        println!("  Device token already exists, skipping...");
        return Ok(());
    }

    device_tokens::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        token: Set(DEMO_DEVICE_TOKEN.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    println!("  Registered device for user {user_id}");
    Ok(())
}
