use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Hotel, HotelChanges, NewHotel};
use crate::domain::value_objects::HotelId;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for hotel persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Insert a new hotel and return it with generated id and timestamps
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, RepositoryError>;

    /// Find hotel by ID; absence is `Ok(None)`, not an error
    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, RepositoryError>;

    /// All hotels, newest created first
    async fn find_all_ordered_by_created_desc(&self) -> Result<Vec<Hotel>, RepositoryError>;

    /// Write only the supplied fields. `Ok(None)` if the row no longer exists.
    async fn update_fields(
        &self,
        id: HotelId,
        changes: &HotelChanges,
    ) -> Result<Option<Hotel>, RepositoryError>;

    /// Hard delete; returns whether a row was removed
    async fn delete_by_id(&self, id: HotelId) -> Result<bool, RepositoryError>;

    /// Cheap round trip used by readiness probes
    async fn ping(&self) -> Result<(), RepositoryError>;
}
