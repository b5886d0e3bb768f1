//! Events API routes
//!
//! Wires the events domain to MongoDB and the configured API token.

use crate::state::AppState;
use axum::Router;
use axum_helpers::BearerAuth;
use domain_events::{EventService, MongoEventRepository};
use tracing::{info, warn};

/// Create the events router
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::from_config(&state.mongo_client, &state.config.mongodb);
    let service = EventService::new(repository, state.schema.clone());

    if state.config.auth_enabled() {
        info!("Bearer authentication enabled for /events");
    } else {
        warn!("No API token configured, /events accepts unauthenticated requests");
    }

    domain_events::router(service, BearerAuth::new(state.config.api_token.clone()))
}
