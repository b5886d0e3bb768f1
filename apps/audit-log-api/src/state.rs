//! Application state management.
//!
//! Everything here is built once at startup and only read afterwards.

use domain_events::EventSchema;
use mongodb::Client;
use std::sync::Arc;

/// Shared application state.
///
/// Cloning is cheap: the client shares its connection pool and the schema
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from flags and environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// Compiled event schema
    pub schema: Arc<EventSchema>,
}
