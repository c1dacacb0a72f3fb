use std::sync::Arc;

use crate::application::dto::{CreateHotelRequest, HotelDto};
use crate::application::errors::HotelUseCaseError;
use crate::application::ports::{HotelRepository, PhotoStore};
use crate::application::use_cases::discard_photo;
use crate::application::validation::{validate_create, PhotoPolicy};
use crate::domain::authorization::CallerIdentity;

/// Use case: Create a hotel, optionally with a photo
pub struct CreateHotelUseCase {
    hotel_repo: Arc<dyn HotelRepository>,
    photo_store: Arc<dyn PhotoStore>,
    photo_policy: PhotoPolicy,
}

impl CreateHotelUseCase {
    pub fn new(
        hotel_repo: Arc<dyn HotelRepository>,
        photo_store: Arc<dyn PhotoStore>,
        photo_policy: PhotoPolicy,
    ) -> Self {
        Self {
            hotel_repo,
            photo_store,
            photo_policy,
        }
    }

    /// Execute create workflow
    pub async fn execute(
        &self,
        caller: &CallerIdentity,
        request: CreateHotelRequest,
    ) -> Result<HotelDto, HotelUseCaseError> {
        // 1. Validate everything before touching storage
        let (mut new_hotel, photo) = validate_create(&request, &self.photo_policy)?;

        // 2. Write the photo blob
        if let Some(photo) = photo {
            let path = self
                .photo_store
                .put(photo.bytes, &self.photo_policy.namespace, photo.extension)
                .await?;
            new_hotel.attach_photo(path);
        }

        // 3. Insert; a failed insert must not leave the blob behind
        let hotel = match self.hotel_repo.insert(&new_hotel).await {
            Ok(hotel) => hotel,
            Err(e) => {
                if let Some(path) = new_hotel.photo() {
                    discard_photo(self.photo_store.as_ref(), path, "insert failed").await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            caller = %caller,
            hotel_id = %hotel.id(),
            photo = ?hotel.photo().map(|p| p.as_str()),
            "Hotel created"
        );

        Ok(HotelDto::from_hotel(&hotel, self.photo_store.as_ref()))
    }
}
