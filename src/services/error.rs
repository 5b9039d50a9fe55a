use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Failures raised by the report and user services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid report. Cause: [{}]", .errors.join(", "))]
    ValidationFailed { errors: Vec<String> },

    #[error("Authentication required: no current principal")]
    AuthenticationRequired,

    #[error("{0}")]
    IllegalState(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
