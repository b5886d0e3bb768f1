//! API routes module
//!
//! `/events` is served at the root and guarded by the bearer token.
//! `/health` and `/ready` are always open.

pub mod events;
pub mod health;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(events::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app))
}
