use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// The requested transition is invalid for the post's current state.
    /// Callers must re-derive the intended action rather than retry.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
    /// The post lock could not be acquired within the configured wait.
    /// Retrying the whole command is safe.
    #[error("Lock timeout: {0}")]
    LockTimeout(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, DomainError::PreconditionViolation(_))
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                DomainError::Storage(format!("Database error: {}", db_err.message()))
            }
            other => DomainError::Storage(other.to_string()),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
