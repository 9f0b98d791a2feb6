//! Shared types, errors, and configuration for PayUp.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Cent amount formatting
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token validation
//! - The push gateway HTTP client

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod push;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, PushConfig};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use push::{PushClient, PushError, PushNotification, PushPayload};
