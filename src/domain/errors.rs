use thiserror::Error;

/// Failure categories surfaced by the notification core.
///
/// The request layer decides transport status codes; this type only keeps the
/// categories distinguishable.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::ValidationError(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Fails with a validation error naming `field` when `value` is empty.
pub fn require(value: &str, field: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(())
}
