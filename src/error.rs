use thiserror::Error;

/// Error type for builderx operations
#[derive(Debug, Error)]
pub enum BuilderxError {
    /// Opening the connection or the liveness check failed.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The query input carried nothing executable.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A statement builder could not render itself to SQL.
    #[error("Failed to render query: {0}")]
    Resolution(String),

    /// The database rejected the statement, or a row could not be scanned.
    #[error("Query failed: {0}")]
    Execution(String),

    #[error("No rows in result set")]
    NoRows,
}

/// Result type alias for builderx operations
pub type Result<T> = std::result::Result<T, BuilderxError>;
