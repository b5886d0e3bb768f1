//! JSON response envelope.
//!
//! Every response leaving the service is written through [`json_response`],
//! which sets `Content-Type: application/json` and an exact `Content-Length`.
//! Errors always serialize as `{"description": "<message>"}`.

pub mod handlers;
pub mod responses;

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body written when a 204 is produced
const NO_CONTENT_BODY: &[u8] = b"{}";

/// Last-resort error body, used if encoding an [`ErrorResponse`] ever fails
const INTERNAL_ERROR_BODY: &[u8] = br#"{"description":"Internal Server Error"}"#;

/// Error body returned for every failed request.
///
/// # JSON Example
///
/// ```json
/// { "description": "Unauthorized" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, safe to show to clients
    pub description: String,
}

impl ErrorResponse {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The standard description for a status, i.e. its reason phrase
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status.canonical_reason().unwrap_or("Unknown Error"))
    }

    fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|_| INTERNAL_ERROR_BODY.to_vec())
    }
}

/// Build a JSON response with exact framing headers.
///
/// Headers are set before the status and body are handed to the server, so
/// nothing downstream should add to them.
pub fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let length = body.len();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    response
}

/// Success envelope.
///
/// ```ignore
/// async fn list() -> Result<Envelope<Vec<Event>>, AppError> {
///     Ok(Envelope::ok(service.query(filter).await?))
/// }
///
/// async fn create() -> Result<Envelope<()>, AppError> {
///     service.ingest(&body).await?;
///     Ok(Envelope::no_content())
/// }
/// ```
#[derive(Debug)]
pub struct Envelope<T> {
    status: StatusCode,
    value: Option<T>,
}

impl<T> Envelope<T> {
    /// 200 with `value` as the body
    pub fn ok(value: T) -> Self {
        Self::with_status(StatusCode::OK, value)
    }

    /// `value` as the body under a status chosen by the caller
    pub fn with_status(status: StatusCode, value: T) -> Self {
        Self {
            status,
            value: Some(value),
        }
    }
}

impl Envelope<()> {
    /// 204 with an empty object body
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            value: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let Some(value) = self.value else {
            return json_response(StatusCode::NO_CONTENT, NO_CONTENT_BODY.to_vec());
        };

        match serde_json::to_vec(&value) {
            Ok(body) => json_response(self.status, body),
            Err(e) => AppError::SerdeJson(e).into_response(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Each variant maps to exactly one status code. Server-side failures keep
/// their detail for the logs and answer with the bare reason phrase.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Wrap an error that carries no status of its own; it becomes a 500
    pub fn internal(err: impl std::fmt::Display) -> Self {
        AppError::InternalServerError(err.to_string())
    }

    /// 400 with the standard "Bad Request" description
    pub fn bad_request() -> Self {
        AppError::BadRequest(reason(StatusCode::BAD_REQUEST))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SerdeJson(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// What the client gets to see
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::BadRequest(msg) => ErrorResponse::new(msg.clone()),
            other => ErrorResponse::from_status(other.status()),
        }
    }
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown Error").to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::SerdeJson(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
            }
            AppError::InternalServerError(detail) => {
                tracing::error!("Internal server error: {}", detail);
            }
            AppError::ServiceUnavailable(detail) => {
                tracing::warn!("Service unavailable: {}", detail);
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
            }
            AppError::Unauthorized | AppError::NotFound | AppError::MethodNotAllowed => {
                tracing::debug!(status = status.as_u16(), "Request rejected");
            }
        }

        json_response(status, self.to_error_response().to_bytes())
    }
}
