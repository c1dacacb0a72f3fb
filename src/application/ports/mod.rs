mod hotel_repository;
mod photo_store;

pub use hotel_repository::{HotelRepository, RepositoryError};
pub use photo_store::{PhotoStore, StorageError};

#[cfg(test)]
pub use hotel_repository::MockHotelRepository;
#[cfg(test)]
pub use photo_store::MockPhotoStore;
