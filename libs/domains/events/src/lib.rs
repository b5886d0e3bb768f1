//! Events Domain
//!
//! Audit events: schema-validated ingestion into MongoDB and equality-filtered
//! queries over what was stored.
//!
//! # Request flow
//!
//! ```text
//! bearer auth ─► method routing ─┬─ POST /events ─► schema ─► insert ─► 204 {}
//!                                └─ GET  /events ─► filter ─► find   ─► 200 [...]
//! ```

use axum_helpers::ErrorResponse;
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse,
    UnauthorizedResponse,
};
use utoipa::OpenApi;

mod error;
pub mod handlers;
mod models;
mod mongodb;
mod repository;
mod schema;
mod service;

pub use error::{EventError, Result};
pub use handlers::{EVENTS_PATH, EventsState, router};
pub use models::{Event, EventDocument, EventFilter, FilterValue, ID_FIELD};
pub use mongodb::{MongoEventRepository, STORE_DEADLINE};
pub use repository::EventRepository;
pub use schema::{EventSchema, SchemaError, ValidationReport, Violation};
pub use service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_events, handlers::create_event),
    components(
        schemas(Event, ErrorResponse),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            MethodNotAllowedResponse,
            InternalServerErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Audit event ingestion and queries")
    )
)]
pub struct ApiDoc;
