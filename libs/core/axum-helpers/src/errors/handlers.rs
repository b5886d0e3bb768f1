use axum::response::{IntoResponse, Response};

use super::AppError;

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    AppError::NotFound.into_response()
}

/// Fallback for a known path hit with an unregistered method.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
