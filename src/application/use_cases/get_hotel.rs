use std::sync::Arc;

use crate::application::dto::HotelDto;
use crate::application::errors::HotelUseCaseError;
use crate::application::ports::{HotelRepository, PhotoStore};
use crate::domain::authorization::CallerIdentity;
use crate::domain::value_objects::HotelId;

/// Use case: Fetch a single hotel
pub struct GetHotelUseCase {
    hotel_repo: Arc<dyn HotelRepository>,
    photo_store: Arc<dyn PhotoStore>,
}

impl GetHotelUseCase {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>, photo_store: Arc<dyn PhotoStore>) -> Self {
        Self {
            hotel_repo,
            photo_store,
        }
    }

    pub async fn execute(
        &self,
        caller: &CallerIdentity,
        id: HotelId,
    ) -> Result<HotelDto, HotelUseCaseError> {
        let hotel = self
            .hotel_repo
            .find_by_id(id)
            .await?
            .ok_or(HotelUseCaseError::NotFound(id))?;

        tracing::debug!(caller = %caller, hotel_id = %id, "Fetched hotel");

        Ok(HotelDto::from_hotel(&hotel, self.photo_store.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockHotelRepository, MockPhotoStore};
    use crate::application::use_cases::test_support::{caller, sample_hotel};

    #[tokio::test]
    async fn test_get_hotel_found() {
        let mut mock_repo = MockHotelRepository::new();
        let hotel = sample_hotel(7, None);
        let expected = hotel.clone();

        mock_repo
            .expect_find_by_id()
            .withf(|id| id.as_i64() == 7)
            .times(1)
            .returning(move |_| Ok(Some(hotel.clone())));

        let use_case = GetHotelUseCase::new(Arc::new(mock_repo), Arc::new(MockPhotoStore::new()));
        let dto = use_case.execute(&caller(), HotelId::from_db(7)).await.unwrap();

        assert_eq!(dto.id, 7);
        assert_eq!(dto.name, expected.name());
        assert_eq!(dto.price_per_night, "120.00");
        assert!(dto.photo.is_none());
    }

    #[tokio::test]
    async fn test_get_hotel_not_found() {
        let mut mock_repo = MockHotelRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let use_case = GetHotelUseCase::new(Arc::new(mock_repo), Arc::new(MockPhotoStore::new()));
        let result = use_case.execute(&caller(), HotelId::from_db(999_999)).await;

        assert!(matches!(result, Err(HotelUseCaseError::NotFound(id)) if id.as_i64() == 999_999));
    }
}
