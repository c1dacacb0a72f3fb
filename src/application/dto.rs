use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::PhotoStore;
use crate::domain::{entities::Hotel, value_objects::FieldUpdate};

/// JSON representation of a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HotelDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Decimal string with two fractional digits, e.g. "120.00"
    #[schema(example = "120.00")]
    pub price_per_night: String,
    #[schema(example = "EUR")]
    pub currency: String,
    /// Store-relative path of the photo
    pub photo: Option<String>,
    /// Public URL of the photo, only present when `photo` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl HotelDto {
    pub fn from_hotel(hotel: &Hotel, photo_store: &dyn PhotoStore) -> Self {
        Self {
            id: hotel.id().as_i64(),
            name: hotel.name().to_string(),
            address: hotel.address().to_string(),
            email: hotel.email().map(str::to_string),
            phone: hotel.phone().map(str::to_string),
            price_per_night: hotel.price_per_night().to_string(),
            currency: hotel.currency().to_string(),
            photo: hotel.photo().map(|p| p.to_string()),
            photo_url: hotel.photo().map(|p| photo_store.resolve(p)),
            created_at: hotel.created_at().to_rfc3339(),
            updated_at: hotel.updated_at().to_rfc3339(),
        }
    }
}

/// Confirmation returned by delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Deleted")]
    pub message: String,
}

impl DeletedResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Deleted".to_string(),
        }
    }
}

/// Uploaded file as received from the client, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Raw create input. Every field is optional here so that missing values
/// are reported as validation messages rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateHotelRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub price_per_night: Option<String>,
    pub currency: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Raw partial update input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateHotelRequest {
    pub name: FieldUpdate<String>,
    pub address: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub phone: FieldUpdate<String>,
    pub price_per_night: FieldUpdate<String>,
    pub currency: FieldUpdate<String>,
    pub photo: Option<PhotoUpload>,
}
