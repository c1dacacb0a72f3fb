use std::sync::Arc;

use crate::application::dto::{HotelDto, UpdateHotelRequest};
use crate::application::errors::HotelUseCaseError;
use crate::application::ports::{HotelRepository, PhotoStore};
use crate::application::use_cases::discard_photo;
use crate::application::validation::{validate_update, PhotoPolicy};
use crate::domain::authorization::CallerIdentity;
use crate::domain::value_objects::HotelId;

/// Use case: Partially update a hotel, optionally replacing its photo
pub struct UpdateHotelUseCase {
    hotel_repo: Arc<dyn HotelRepository>,
    photo_store: Arc<dyn PhotoStore>,
    photo_policy: PhotoPolicy,
}

impl UpdateHotelUseCase {
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

    /// Execute update workflow.
    ///
    /// A replaced photo is written before the record points at it and the old
    /// blob is removed only after the record has moved on, so the stored
    /// `photo` never references a missing blob.
    pub async fn execute(
        &self,
        caller: &CallerIdentity,
        id: HotelId,
        request: UpdateHotelRequest,
    ) -> Result<HotelDto, HotelUseCaseError> {
        // 1. Existence first, so unknown ids are 404 even with bad input
        let existing = self
            .hotel_repo
            .find_by_id(id)
            .await?
            .ok_or(HotelUseCaseError::NotFound(id))?;

        // 2. Validate only what was sent
        let (mut changes, photo) = validate_update(&request, &self.photo_policy)?;

        if changes.is_empty() && photo.is_none() {
            tracing::debug!(caller = %caller, hotel_id = %id, "Empty update, nothing to do");
            return Ok(HotelDto::from_hotel(&existing, self.photo_store.as_ref()));
        }

        // 3. Write the replacement photo
        if let Some(photo) = photo {
            let path = self
                .photo_store
                .put(photo.bytes, &self.photo_policy.namespace, photo.extension)
                .await?;
            changes.replace_photo(path);
        }

        // 4. Point the record at the new state
        let updated = match self.hotel_repo.update_fields(id, &changes).await {
            Ok(Some(hotel)) => hotel,
            Ok(None) => {
                if let Some(path) = changes.photo() {
                    discard_photo(self.photo_store.as_ref(), path, "hotel vanished").await;
                }
                return Err(HotelUseCaseError::NotFound(id));
            }
            Err(e) => {
                if let Some(path) = changes.photo() {
                    discard_photo(self.photo_store.as_ref(), path, "update failed").await;
                }
                return Err(e.into());
            }
        };

        // 5. Drop the blob the record no longer references
        if let (Some(new_photo), Some(old_photo)) = (changes.photo(), existing.photo()) {
            if new_photo != old_photo {
                discard_photo(self.photo_store.as_ref(), old_photo, "photo replaced").await;
            }
        }

        tracing::info!(
            caller = %caller,
            hotel_id = %id,
            photo_replaced = changes.photo().is_some(),
            "Hotel updated"
        );

        Ok(HotelDto::from_hotel(&updated, self.photo_store.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::PhotoUpload;
    use crate::application::ports::{
        MockHotelRepository, MockPhotoStore, RepositoryError, StorageError,
    };
    use crate::application::use_cases::test_support::{caller, sample_hotel};
    use crate::application::validation::test_images;
    use crate::domain::value_objects::{FieldUpdate, PhotoPath};
    use bytes::Bytes;
    use chrono::Utc;
    use mockall::Sequence;

    fn png_upload() -> PhotoUpload {
        PhotoUpload {
            bytes: Bytes::from(test_images::png_bytes()),
            file_name: Some("pool.png".to_string()),
            content_type: Some("image/png".to_string()),
        }
    }

    fn url(path: &PhotoPath) -> String {
        format!("http://localhost:8080/storage/{}", path)
    }

    #[tokio::test]
    async fn test_update_name_only_keeps_photo() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(5, Some("hotels/old.jpg")))));
        mock_repo
            .expect_update_fields()
            .withf(|id, changes| {
                id.as_i64() == 5
                    && changes.name.as_deref() == Some("Terrou-Bi Resort")
                    && changes.address.is_none()
                    && changes.photo().is_none()
            })
            .times(1)
            .returning(|_, changes| {
                let mut hotel = sample_hotel(5, Some("hotels/old.jpg"));
                hotel.apply_changes(changes, Utc::now());
                Ok(Some(hotel))
            });
        mock_store.expect_resolve().returning(url);

        let use_case =
            UpdateHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store), PhotoPolicy::default());
        let request = UpdateHotelRequest {
            name: FieldUpdate::Set("Terrou-Bi Resort".to_string()),
            ..Default::default()
        };
        let dto = use_case
            .execute(&caller(), HotelId::from_db(5), request)
            .await
            .unwrap();

        assert_eq!(dto.name, "Terrou-Bi Resort");
        assert_eq!(dto.photo.as_deref(), Some("hotels/old.jpg"));
    }

    #[tokio::test]
    async fn test_update_photo_replacement_order() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(sample_hotel(5, Some("hotels/old.jpg")))));
        mock_store
            .expect_put()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(PhotoPath::new("hotels/new.png").unwrap()));
        mock_repo
            .expect_update_fields()
            .withf(|_, changes| changes.photo().map(|p| p.as_str()) == Some("hotels/new.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, changes| {
                let mut hotel = sample_hotel(5, Some("hotels/old.jpg"));
                hotel.apply_changes(changes, Utc::now());
                Ok(Some(hotel))
            });
        mock_store
            .expect_delete()
            .withf(|path| path.as_str() == "hotels/old.jpg")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock_store.expect_resolve().returning(url);

        let use_case =
            UpdateHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store), PhotoPolicy::default());
        let request = UpdateHotelRequest {
            photo: Some(png_upload()),
            ..Default::default()
        };
        let dto = use_case
            .execute(&caller(), HotelId::from_db(5), request)
            .await
            .unwrap();

        assert_eq!(dto.photo.as_deref(), Some("hotels/new.png"));
    }

    #[tokio::test]
    async fn test_update_failure_keeps_old_photo_and_removes_new() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(5, Some("hotels/old.jpg")))));
        mock_store
            .expect_put()
            .returning(|_, _, _| Ok(PhotoPath::new("hotels/new.png").unwrap()));
        mock_repo
            .expect_update_fields()
            .returning(|_, _| Err(RepositoryError::Internal("deadlock".to_string())));
        mock_store
            .expect_delete()
            .withf(|path| path.as_str() == "hotels/new.png")
            .times(1)
            .returning(|_| Ok(()));

        let use_case =
            UpdateHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store), PhotoPolicy::default());
        let request = UpdateHotelRequest {
            photo: Some(png_upload()),
            ..Default::default()
        };
        let result = use_case.execute(&caller(), HotelId::from_db(5), request).await;

        assert!(matches!(result, Err(HotelUseCaseError::Repository(_))));
    }

    #[tokio::test]
    async fn test_update_old_blob_delete_failure_is_swallowed() {
        let mut mock_repo = MockHotelRepository::new();
        let mut mock_store = MockPhotoStore::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(5, Some("hotels/old.jpg")))));
        mock_store
            .expect_put()
            .returning(|_, _, _| Ok(PhotoPath::new("hotels/new.png").unwrap()));
        mock_repo.expect_update_fields().returning(|_, changes| {
            let mut hotel = sample_hotel(5, None);
            hotel.apply_changes(changes, Utc::now());
            Ok(Some(hotel))
        });
        mock_store
            .expect_delete()
            .returning(|_| Err(StorageError::Io(std::io::Error::other("read-only fs"))));
        mock_store.expect_resolve().returning(url);

        let use_case =
            UpdateHotelUseCase::new(Arc::new(mock_repo), Arc::new(mock_store), PhotoPolicy::default());
        let request = UpdateHotelRequest {
            photo: Some(png_upload()),
            ..Default::default()
        };

        assert!(use_case
            .execute(&caller(), HotelId::from_db(5), request)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_before_validation() {
        let mut mock_repo = MockHotelRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let use_case = UpdateHotelUseCase::new(
            Arc::new(mock_repo),
            Arc::new(MockPhotoStore::new()),
            PhotoPolicy::default(),
        );
        let request = UpdateHotelRequest {
            currency: FieldUpdate::Set("EURO".to_string()),
            ..Default::default()
        };
        let result = use_case
            .execute(&caller(), HotelId::from_db(999_999), request)
            .await;

        assert!(matches!(result, Err(HotelUseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_cleared_field_fails_required() {
        let mut mock_repo = MockHotelRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(5, None))));

        let use_case = UpdateHotelUseCase::new(
            Arc::new(mock_repo),
            Arc::new(MockPhotoStore::new()),
            PhotoPolicy::default(),
        );
        let request = UpdateHotelRequest {
            name: FieldUpdate::Cleared,
            ..Default::default()
        };
        let result = use_case.execute(&caller(), HotelId::from_db(5), request).await;

        match result {
            Err(HotelUseCaseError::Validation(errors)) => {
                assert_eq!(errors.messages("name"), ["The name field is required."]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_empty_request_returns_stored_record() {
        let mut mock_repo = MockHotelRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_hotel(5, None))));
        // no expect_update_fields: calling it would panic

        let use_case = UpdateHotelUseCase::new(
            Arc::new(mock_repo),
            Arc::new(MockPhotoStore::new()),
            PhotoPolicy::default(),
        );
        let dto = use_case
            .execute(&caller(), HotelId::from_db(5), UpdateHotelRequest::default())
            .await
            .unwrap();

        assert_eq!(dto.id, 5);
    }
}
