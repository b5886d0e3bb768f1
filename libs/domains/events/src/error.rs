//! Event domain error types

use crate::schema::ValidationReport;
use axum_helpers::AppError;
use std::time::Duration;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Event domain errors
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Body could not be read or is not a JSON object
    #[error("Malformed request body")]
    MalformedBody,

    /// Query string could not be decoded
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    /// Body parsed but broke one or more schema rules
    #[error("{0}")]
    Validation(ValidationReport),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A store call outlived its deadline
    #[error("Store {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Serialization(format!("BSON serialization error: {}", err))
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::MalformedBody | EventError::MalformedQuery(_) => AppError::bad_request(),
            EventError::Validation(report) => AppError::BadRequest(report.to_string()),
            EventError::Database(_) | EventError::Timeout { .. } | EventError::Serialization(_) => {
                AppError::internal(err)
            }
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Violation;
    use axum::http::StatusCode;

    #[test]
    fn test_client_errors_map_to_400() {
        let malformed: AppError = EventError::MalformedBody.into();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(malformed.to_error_response().description, "Bad Request");

        let report = ValidationReport {
            violations: vec![Violation::new("/summary", "\"\" is shorter than 1 character")],
        };
        let invalid: AppError = EventError::Validation(report).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            invalid.to_error_response().description,
            "The json did not match the expected format: /summary '' is shorter than 1 character"
        );
    }

    #[test]
    fn test_store_errors_map_to_opaque_500() {
        let timeout: AppError = EventError::Timeout {
            operation: "insert",
            after: Duration::from_secs(10),
        }
        .into();

        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            timeout.to_error_response().description,
            "Internal Server Error"
        );
    }
}
