//! Error type shared by the hotel use cases

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::errors::ValidationErrors;
use crate::domain::value_objects::HotelId;

#[derive(Debug, Error)]
pub enum HotelUseCaseError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Hotel not found: {0}")]
    NotFound(HotelId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
