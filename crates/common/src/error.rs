//! Error types for notemood-rs.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Caller Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(i32),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Infrastructure Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    /// A reference row the system depends on is absent (e.g. the "Neutral"
    /// sentiment required by the daily tie-break). Seeded at deployment
    /// time; hitting this at runtime is a deployment defect.
    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code used in structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Queue(_) => "QUEUE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::MissingReferenceData(_) => "MISSING_REFERENCE_DATA",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error indicates a fault in the system itself
    /// rather than in the request that triggered it.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        !matches!(
            self,
            Self::NotFound(_) | Self::EntryNotFound(_) | Self::BadRequest(_) | Self::Conflict(_)
        )
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(AppError::EntryNotFound(7).error_code(), "ENTRY_NOT_FOUND");
        assert_eq!(
            AppError::MissingReferenceData("Neutral".into()).error_code(),
            "MISSING_REFERENCE_DATA"
        );
    }

    #[test]
    fn reference_data_errors_are_server_errors() {
        assert!(AppError::MissingReferenceData("Neutral".into()).is_server_error());
        assert!(!AppError::EntryNotFound(1).is_server_error());
    }
}
