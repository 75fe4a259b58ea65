use thiserror::Error;

use crate::database::RepositoryError;

/// Typed outcome of a failed resource operation.
///
/// Store causes stay attached through `#[source]` for logging; callers only
/// see `kind()` and `safe_message()`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource belongs to another user")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database is not configured")]
    DatabaseUnavailable,

    #[error("Database operation failed")]
    Database(#[source] sqlx::Error),

    #[error("Stored {0} attributes are unreadable")]
    CorruptAttributeData(&'static str),
}

impl ServiceError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::ValidationFailed(_) => "VALIDATION_FAILED",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::Forbidden => "FORBIDDEN",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            ServiceError::Database(_) => "DATABASE_ERROR",
            ServiceError::CorruptAttributeData(_) => "CORRUPT_ATTRIBUTE_DATA",
        }
    }

    /// Message that is safe to return to the caller
    pub fn safe_message(&self) -> String {
        match self {
            ServiceError::ValidationFailed(message) => message.clone(),
            ServiceError::Database(_) => "Database error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Wrap a repository failure, naming the resource for `NotFound`
    pub fn from_repository(err: RepositoryError, resource: &'static str) -> Self {
        match err {
            RepositoryError::Unavailable => ServiceError::DatabaseUnavailable,
            RepositoryError::NotFound => ServiceError::NotFound(resource),
            RepositoryError::CorruptAttributes { column } => ServiceError::CorruptAttributeData(column),
            RepositoryError::Query(e) => ServiceError::Database(e),
            RepositoryError::Migration(e) => ServiceError::Database(sqlx::Error::Migrate(Box::new(e))),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
