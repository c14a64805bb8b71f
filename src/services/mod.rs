//! Workflows of the salesman portal built on the domain and form layers.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{AuthenticatedUser, Role};
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod recovery;
pub mod reports;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `user` holds one of
/// `roles`.
pub fn ensure_role(user: &AuthenticatedUser, roles: &[Role]) -> ServiceResult<()> {
    if user.has_any_role(roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
