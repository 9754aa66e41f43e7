use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::repository::UniqueNameError;

/// Result type returned by the catalog services.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the catalog services.
///
/// Business-rule errors are raised before any write is issued, except name
/// clashes, which the repository detects inside the write.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The user lacks the role required to manage the catalog.
    #[error("unauthorized")]
    Unauthorized,
    /// The submitted payload failed validation.
    #[error("{0}")]
    Form(String),
    /// Another entry of the hub already uses the name, ignoring case.
    #[error("an entry named `{0}` already exists")]
    DuplicateName(String),
    /// A merge target is the source itself or is not part of the hub.
    #[error("invalid merge target {0}")]
    InvalidTarget(i32),
    /// The requested record does not exist in the hub.
    #[error("not found")]
    NotFound,
    /// The backing store failed.
    #[error("backend failure: {0}")]
    Transport(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Transport(other),
        }
    }
}

impl From<UniqueNameError> for ServiceError {
    fn from(value: UniqueNameError) -> Self {
        match value {
            UniqueNameError::Taken(name) => ServiceError::DuplicateName(name),
            UniqueNameError::Repository(err) => ServiceError::from(err),
        }
    }
}
