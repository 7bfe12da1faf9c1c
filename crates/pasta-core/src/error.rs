use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid paste id: {0}")]
    InvalidPasteId(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("paste id already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the paste service to its callers.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("only the owner of paste {0} may delete it")]
    Forbidden(String),
    #[error("paste not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] StorageError),
    #[error("operation timed out: {0}")]
    Timeout(String),
    #[error("could not allocate a unique paste id after {0} attempts")]
    IdSpaceExhausted(usize),
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Timeout(message) => Self::Timeout(message),
            other => Self::Unavailable(other),
        }
    }
}
