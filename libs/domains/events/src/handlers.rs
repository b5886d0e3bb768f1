//! HTTP handlers for the events API

use crate::error::EventError;
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::middleware;
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse,
    UnauthorizedResponse,
};
use axum_helpers::{BearerAuth, Envelope, MethodRoutes, bearer_auth_middleware};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// Path the events API is served on
pub const EVENTS_PATH: &str = "/events";

/// Create the events router.
///
/// GET and POST are registered on `/events`; anything else gets a 405.
/// `auth` wraps the whole path, so unauthenticated callers see a 401 even
/// for unsupported methods.
pub fn router<R: EventRepository + 'static>(service: EventService<R>, auth: BearerAuth) -> Router {
    let events = MethodRoutes::new()
        .handle("GET", list_events::<R>)
        .handle("POST", create_event::<R>)
        .into_method_router()
        .layer(middleware::from_fn_with_state(auth, bearer_auth_middleware));

    Router::new()
        .route(EVENTS_PATH, events)
        .with_state(Arc::new(service))
}

/// Query stored events
///
/// Every query parameter is an equality condition on that (dotted) field,
/// compared as a string. `_id` takes a 24 character hex id.
#[utoipa::path(
    get,
    path = "/events",
    params(
        ("_id" = Option<String>, Query, description = "Event id (24 hex characters)"),
        ("summary" = Option<String>, Query, description = "Exact summary"),
        ("source.service_name" = Option<String>, Query, description = "Any dotted field path works the same way"),
    ),
    responses(
        (status = 200, description = "Matching events, [] when none", body = Vec<Event>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, query))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Envelope<Vec<Map<String, Value>>>, EventError> {
    let Query(pairs) = query.map_err(|e| EventError::MalformedQuery(e.body_text()))?;
    let filter = EventFilter::from_query_pairs(pairs);

    let events = state.query(&filter).await?;
    debug!(count = events.len(), "Returning events");

    Ok(Envelope::ok(events))
}

/// Record an event
///
/// The body is validated against the event schema before it is stored.
#[utoipa::path(
    post,
    path = "/events",
    request_body = Event,
    responses(
        (status = 204, description = "Event stored; body is {}"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, body))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<()>, EventError> {
    let body = body.map_err(|e| {
        debug!("Failed to read request body: {}", e);
        EventError::MalformedBody
    })?;

    state.ingest(&body).await?;
    Ok(Envelope::no_content())
}
