//! API route definitions.

use axum::{Router, middleware};
use payup_core::notification::Notifier;
use payup_core::store::Store;

use crate::{AppState, middleware::auth_middleware};

pub mod health;
pub mod transactions;

/// Creates the API router; everything except health requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state<S: Store, N: Notifier>(
    state: AppState<S, N>,
) -> Router<AppState<S, N>> {
    let protected_routes = Router::new()
        .merge(transactions::routes::<S, N>())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S, N>,
        ));

    Router::new()
        .merge(health::routes::<S, N>())
        .merge(protected_routes)
}
