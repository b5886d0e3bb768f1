/// Unified database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Operation did not finish before its deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
