mod local_photo_store;
mod path_builder;

pub use local_photo_store::LocalPhotoStore;
pub use path_builder::PathBuilder;
