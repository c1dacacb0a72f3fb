mod currency_code;
mod field_update;
mod hotel_id;
mod photo_namespace;
mod photo_path;
mod price;

pub use currency_code::CurrencyCode;
pub use field_update::FieldUpdate;
pub use hotel_id::HotelId;
pub use photo_namespace::PhotoNamespace;
pub use photo_path::PhotoPath;
pub use price::Price;
