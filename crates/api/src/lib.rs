//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error responses
//!
//! The router is generic over the store and notifier so the same routes serve
//! Postgres in production and the in-memory store in tests.

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use payup_core::notification::Notifier;
use payup_core::store::Store;
use payup_core::transaction::TransactionService;
use payup_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<S, N> {
    /// Transaction operations.
    pub transactions: TransactionService<S, N>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            transactions: self.transactions.clone(),
            jwt_service: Arc::clone(&self.jwt_service),
        }
    }
}

impl<S: Store, N: Notifier> AppState<S, N> {
    /// Wires the transaction service over a store and notifier.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            transactions: TransactionService::new(store, notifier),
            jwt_service,
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: Store, N: Notifier>(state: AppState<S, N>) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
