//! Shared-secret bearer authentication.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{BearerAuth, bearer_auth_middleware};
//!
//! let auth = BearerAuth::new(config.api_token.clone());
//!
//! // Guard every method on /events, including the 405 fallback
//! let events = routes.into_method_router()
//!     .layer(axum::middleware::from_fn_with_state(auth, bearer_auth_middleware));
//! ```

pub mod config;
pub mod middleware;

pub use config::BearerAuth;
pub use middleware::{bearer_auth_middleware, extract_bearer_token};
