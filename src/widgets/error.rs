use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WidgetsError {
    #[error("Invalid change set: {0}")]
    InvalidChangeSet(String),

    #[error("Widget not found: {0}")]
    EntityNotFound(Uuid),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How a caller-facing layer should report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotFound,
    BadRequest,
    Internal,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NotFound => write!(f, "not found"),
            Outcome::BadRequest => write!(f, "bad request"),
            Outcome::Internal => write!(f, "internal error"),
        }
    }
}

impl WidgetsError {
    pub fn outcome(&self) -> Outcome {
        match self {
            WidgetsError::EntityNotFound(_) => Outcome::NotFound,
            WidgetsError::InvalidChangeSet(_) | WidgetsError::InvalidArgument(_) => {
                Outcome::BadRequest
            }
            WidgetsError::Io(_) | WidgetsError::Serialization(_) => Outcome::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, WidgetsError>;
