use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{CurrencyCode, HotelId, PhotoPath, Price};

/// Hotel aggregate root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotel {
    id: HotelId,
    name: String,
    address: String,
    email: Option<String>,
    phone: Option<String>,
    price_per_night: Price,
    currency: CurrencyCode,
    photo: Option<PhotoPath>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Materialize a freshly inserted record
    pub fn from_new(id: HotelId, new: NewHotel, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            email: new.email,
            phone: new.phone,
            price_per_night: new.price_per_night,
            currency: new.currency,
            photo: new.photo,
            created_at: at,
            updated_at: at,
        }
    }

    /// Reconstruct from storage (e.g., database)
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: HotelId,
        name: String,
        address: String,
        email: Option<String>,
        phone: Option<String>,
        price_per_night: Price,
        currency: CurrencyCode,
        photo: Option<PhotoPath>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            address,
            email,
            phone,
            price_per_night,
            currency,
            photo,
            created_at,
            updated_at,
        }
    }

    /// Apply a validated change set. Unset fields keep their value.
    pub fn apply_changes(&mut self, changes: &HotelChanges, at: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(address) = &changes.address {
            self.address = address.clone();
        }
        if let Some(email) = &changes.email {
            self.email = Some(email.clone());
        }
        if let Some(phone) = &changes.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(price) = changes.price_per_night {
            self.price_per_night = price;
        }
        if let Some(currency) = &changes.currency {
            self.currency = currency.clone();
        }
        if let Some(photo) = &changes.photo {
            self.photo = Some(photo.clone());
        }
        self.updated_at = at;
    }

    // Getters
    pub fn id(&self) -> HotelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn price_per_night(&self) -> Price {
        self.price_per_night
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn photo(&self) -> Option<&PhotoPath> {
        self.photo.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated data for a hotel that does not exist yet.
///
/// `photo` can only be attached by the application layer after the blob
/// has been written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub price_per_night: Price,
    pub currency: CurrencyCode,
    pub(crate) photo: Option<PhotoPath>,
}

impl NewHotel {
    pub fn new(
        name: String,
        address: String,
        email: Option<String>,
        phone: Option<String>,
        price_per_night: Price,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            name,
            address,
            email,
            phone,
            price_per_night,
            currency,
            photo: None,
        }
    }

    pub(crate) fn attach_photo(&mut self, photo: PhotoPath) {
        self.photo = Some(photo);
    }

    pub fn photo(&self) -> Option<&PhotoPath> {
        self.photo.as_ref()
    }
}

/// Validated partial update; `None` means "leave as is"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub price_per_night: Option<Price>,
    pub currency: Option<CurrencyCode>,
    pub(crate) photo: Option<PhotoPath>,
}

impl HotelChanges {
    pub(crate) fn replace_photo(&mut self, photo: PhotoPath) {
        self.photo = Some(photo);
    }

    pub fn photo(&self) -> Option<&PhotoPath> {
        self.photo.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.price_per_night.is_none()
            && self.currency.is_none()
            && self.photo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_hotel() -> NewHotel {
        NewHotel::new(
            "Hotel Terrou-Bi".to_string(),
            "Boulevard Martin Luther King, Dakar".to_string(),
            Some("contact@terroubi.com".to_string()),
            Some("+221 33 839 90 39".to_string()),
            Price::new(Decimal::new(150_000, 0)).unwrap(),
            CurrencyCode::new("XOF").unwrap(),
        )
    }

    #[test]
    fn test_from_new_sets_both_timestamps() {
        let now = Utc::now();
        let hotel = Hotel::from_new(HotelId::from_db(1), new_hotel(), now);

        assert_eq!(hotel.created_at(), now);
        assert_eq!(hotel.updated_at(), now);
        assert!(hotel.photo().is_none());
    }

    #[test]
    fn test_apply_changes_only_touches_supplied_fields() {
        let created = Utc::now();
        let mut new = new_hotel();
        new.attach_photo(PhotoPath::new("hotels/a.jpg").unwrap());
        let mut hotel = Hotel::from_new(HotelId::from_db(1), new, created);
        let before = hotel.clone();

        let changes = HotelChanges {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let later = created + chrono::Duration::seconds(5);
        hotel.apply_changes(&changes, later);

        assert_eq!(hotel.name(), "New Name");
        assert_eq!(hotel.address(), before.address());
        assert_eq!(hotel.email(), before.email());
        assert_eq!(hotel.photo(), before.photo());
        assert_eq!(hotel.created_at(), created);
        assert_eq!(hotel.updated_at(), later);
    }

    #[test]
    fn test_changes_is_empty() {
        let mut changes = HotelChanges::default();
        assert!(changes.is_empty());

        changes.replace_photo(PhotoPath::new("hotels/b.png").unwrap());
        assert!(!changes.is_empty());
    }
}
