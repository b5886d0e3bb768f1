//! # Axum Helpers
//!
//! Shared building blocks for the audit log HTTP service.
//!
//! ## Modules
//!
//! - **[`errors`]**: JSON envelope writer and `AppError`
//! - **[`auth`]**: Shared-secret bearer authentication
//! - **[`routing`]**: Per-path method dispatch with a 405 envelope
//! - **[`server`]**: Server setup, health checks, graceful shutdown, TLS
//! - **[`http`]**: Security headers middleware
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{MethodRoutes, create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let events = MethodRoutes::new()
//!         .handle("GET", || async { "[]" })
//!         .into_method_router();
//!     let router = create_router::<ApiDoc>(Router::new().route("/events", events));
//!
//!     create_production_app(router, &ServerConfig::new("0.0.0.0".to_string(), 8080), Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod http;
pub mod routing;
pub mod server;

pub use auth::{BearerAuth, bearer_auth_middleware, extract_bearer_token};

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::security_headers;

pub use errors::{AppError, Envelope, ErrorResponse, json_response};

pub use routing::MethodRoutes;
