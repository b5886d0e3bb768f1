//! MongoDB connector and utilities
//!
//! Provides connection management and the health ping used by readiness checks.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry};
pub use health::{PING_DEADLINE, ping};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
