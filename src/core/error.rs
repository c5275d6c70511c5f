/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the calculation core and its persistence adapters
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Invalid input rejected before any computation (negative quantity,
    /// out-of-range percentage, malformed sequence)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced document, item, tax rate or sequence does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    /// True for errors caused by missing records rather than bad input or I/O
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}
