use std::sync::Arc;

use crate::application::dto::HotelDto;
use crate::application::errors::HotelUseCaseError;
use crate::application::ports::{HotelRepository, PhotoStore};
use crate::domain::authorization::CallerIdentity;

/// Use case: List every hotel, newest first
pub struct ListHotelsUseCase {
    hotel_repo: Arc<dyn HotelRepository>,
    photo_store: Arc<dyn PhotoStore>,
}

impl ListHotelsUseCase {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>, photo_store: Arc<dyn PhotoStore>) -> Self {
        Self {
            hotel_repo,
            photo_store,
        }
    }

    pub async fn execute(&self, caller: &CallerIdentity) -> Result<Vec<HotelDto>, HotelUseCaseError> {
        let hotels = self.hotel_repo.find_all_ordered_by_created_desc().await?;

        tracing::debug!(caller = %caller, count = hotels.len(), "Listed hotels");

        Ok(hotels
            .iter()
            .map(|hotel| HotelDto::from_hotel(hotel, self.photo_store.as_ref()))
            .collect())
    }
}
