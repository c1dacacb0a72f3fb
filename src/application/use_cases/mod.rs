mod create_hotel;
mod delete_hotel;
mod get_hotel;
mod list_hotels;
mod update_hotel;

pub use create_hotel::CreateHotelUseCase;
pub use delete_hotel::DeleteHotelUseCase;
pub use get_hotel::GetHotelUseCase;
pub use list_hotels::ListHotelsUseCase;
pub use update_hotel::UpdateHotelUseCase;

use crate::application::ports::PhotoStore;
use crate::domain::value_objects::PhotoPath;

/// Remove a blob that no record points at any more. Failures are logged and
/// swallowed; the caller has already committed to its outcome.
pub(crate) async fn discard_photo(photo_store: &dyn PhotoStore, path: &PhotoPath, reason: &str) {
    if let Err(e) = photo_store.delete(path).await {
        tracing::warn!(photo = %path, reason, error = %e, "Failed to delete photo blob");
    }
}
