use std::sync::Arc;

use crate::application::dto::DeletedResponse;
use crate::application::errors::HotelUseCaseError;
use crate::application::ports::{HotelRepository, PhotoStore};
use crate::application::use_cases::discard_photo;
use crate::domain::authorization::CallerIdentity;
use crate::domain::value_objects::HotelId;

/// Use case: Delete a hotel and its photo
pub struct DeleteHotelUseCase {
    hotel_repo: Arc<dyn HotelRepository>,
    photo_store: Arc<dyn PhotoStore>,
}

impl DeleteHotelUseCase {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>, photo_store: Arc<dyn PhotoStore>) -> Self {
        Self {
            hotel_repo,
            photo_store,
        }
    }

    /// Execute delete workflow
    pub async fn execute(
        &self,
        caller: &CallerIdentity,
        id: HotelId,
    ) -> Result<DeletedResponse, HotelUseCaseError> {
        // 1. Find hotel
        let hotel = self
            .hotel_repo
            .find_by_id(id)
            .await?
            .ok_or(HotelUseCaseError::NotFound(id))?;

        // 2. Hard delete; a concurrent delete wins the race
        if !self.hotel_repo.delete_by_id(id).await? {
            return Err(HotelUseCaseError::NotFound(id));
        }

        // 3. The record is gone, so its blob can go too; failures only log
        if let Some(photo) = hotel.photo() {
            discard_photo(self.photo_store.as_ref(), photo, "hotel deleted").await;
        }

        tracing::info!(caller = %caller, hotel_id = %id, "Hotel deleted");

        Ok(DeletedResponse::deleted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockHotelRepository, MockPhotoStore, RepositoryError, StorageError,
    };
    use crate::application::use_cases::test_support::{caller, sample_hotel};
    use mockall::Sequence;

    #[tokio::test]
    async fn test_delete_hotel_removes_record_then_photo() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_find_by_id()
            .withf(|id| id.as_i64() == 9)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(sample_hotel(9, Some("hotels/front.jpg")))));
        mock_repo
            .expect_delete_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_store
            .expect_delete()
            .withf(|path| path.as_str() == "hotels/front.jpg")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store));
        let response = use_case.execute(&caller(), HotelId::from_db(9)).await.unwrap();

        assert_eq!(response.message, "Deleted");
    }

    #[tokio::test]
    async fn test_delete_hotel_without_photo_skips_store() {
        let mut mock_repo = MockHotelRepository::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(9, None))));
        mock_repo
            .expect_delete_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(MockPhotoStore::new()));
        assert!(use_case.execute(&caller(), HotelId::from_db(9)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_hotel_blob_failure_still_removes_record() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(9, Some("hotels/front.jpg")))));
        mock_store
            .expect_delete()
            .returning(|_| Err(StorageError::Io(std::io::Error::other("permission denied"))));
        mock_repo
            .expect_delete_by_id()
            .times(1)
            .returning(|_| Ok(true));

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store));
        assert!(use_case.execute(&caller(), HotelId::from_db(9)).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_record_delete_keeps_photo() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(9, Some("hotels/front.jpg")))));
        mock_repo
            .expect_delete_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::Internal("connection lost".to_string())));
        mock_store.expect_delete().times(0);

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store));
        let result = use_case.execute(&caller(), HotelId::from_db(9)).await;

        assert!(matches!(result, Err(HotelUseCaseError::Repository(_))));
    }

    #[tokio::test]
    async fn test_concurrent_delete_keeps_photo_for_winner() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(9, Some("hotels/front.jpg")))));
        mock_repo.expect_delete_by_id().returning(|_| Ok(false));
        mock_store.expect_delete().times(0);

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store));
        let result = use_case.execute(&caller(), HotelId::from_db(9)).await;

        assert!(matches!(result, Err(HotelUseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_hotel_not_found() {
        let mut mock_repo = MockHotelRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let use_case = DeleteHotelUseCase::new(Arc::new(mock_repo), Arc::new(MockPhotoStore::new()));
        let result = use_case.execute(&caller(), HotelId::from_db(999_999)).await;

        assert!(matches!(result, Err(HotelUseCaseError::NotFound(_))));
    }
}
