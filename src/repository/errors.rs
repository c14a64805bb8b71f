use thiserror::Error;

use crate::source::FetchError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<FetchError> for RepositoryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(message) => RepositoryError::ConnectionError(message),
            FetchError::Status { status: 404, .. } => RepositoryError::NotFound,
            FetchError::Status { status, message } => {
                RepositoryError::BackendError { status, message }
            }
            FetchError::Shape(message) => RepositoryError::Unexpected(message),
        }
    }
}
