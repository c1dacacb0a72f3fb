//! Request validation for the hotel use cases
//!
//! Turns raw request DTOs into validated domain inputs. Runs before any
//! side effect, so a rejected request leaves no blob and no row behind.

use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

use crate::application::dto::{CreateHotelRequest, PhotoUpload, UpdateHotelRequest};
use crate::domain::entities::{HotelChanges, NewHotel};
use crate::domain::errors::ValidationErrors;
use crate::domain::validation::{self as rules, messages};
use crate::domain::value_objects::{FieldUpdate, PhotoNamespace};

pub const DEFAULT_MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::WebP,
];

/// Where photos go and how large they may be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPolicy {
    pub namespace: PhotoNamespace,
    pub max_bytes: usize,
}

impl PhotoPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            namespace: PhotoNamespace::hotels(),
            max_bytes,
        }
    }

    pub fn max_kilobytes(&self) -> usize {
        self.max_bytes / 1024
    }
}

impl Default for PhotoPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PHOTO_BYTES)
    }
}

/// Photo that passed the image and size rules
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPhoto {
    pub bytes: Bytes,
    pub extension: &'static str,
}

/// Detect the image format from content (never from the file name) and make
/// sure the header decodes
pub fn sniff_image(bytes: &[u8]) -> Option<ImageFormat> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return None;
    }
    reader.into_dimensions().ok()?;
    Some(format)
}

pub fn validate_photo(
    upload: &PhotoUpload,
    policy: &PhotoPolicy,
    errors: &mut ValidationErrors,
) -> Option<ValidatedPhoto> {
    let format = sniff_image(&upload.bytes);
    if format.is_none() {
        errors.add("photo", messages::image("photo"));
    }

    if upload.bytes.len() > policy.max_bytes {
        errors.add("photo", messages::max_kilobytes("photo", policy.max_kilobytes()));
        return None;
    }

    format.map(|format| ValidatedPhoto {
        bytes: upload.bytes.clone(),
        extension: format.extensions_str().first().copied().unwrap_or("img"),
    })
}

/// Every field is required on create
pub fn validate_create(
    request: &CreateHotelRequest,
    policy: &PhotoPolicy,
) -> Result<(NewHotel, Option<ValidatedPhoto>), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = rules::text(
        "name",
        request.name.as_deref(),
        rules::NAME_MAX_CHARS,
        &mut errors,
    );
    let address = rules::text(
        "address",
        request.address.as_deref(),
        rules::ADDRESS_MAX_CHARS,
        &mut errors,
    );
    let email = rules::email("email", request.email.as_deref(), &mut errors);
    let phone = rules::text(
        "phone",
        request.phone.as_deref(),
        rules::PHONE_MAX_CHARS,
        &mut errors,
    );
    let price = rules::price(
        "price_per_night",
        request.price_per_night.as_deref(),
        &mut errors,
    );
    let currency = rules::currency("currency", request.currency.as_deref(), &mut errors);
    let photo = request
        .photo
        .as_ref()
        .and_then(|upload| validate_photo(upload, policy, &mut errors));

    match (name, address, email, phone, price, currency) {
        (Some(name), Some(address), Some(email), Some(phone), Some(price), Some(currency))
            if errors.is_empty() =>
        {
            let new_hotel =
                NewHotel::new(name, address, Some(email), Some(phone), price, currency);
            Ok((new_hotel, photo))
        }
        _ => Err(errors),
    }
}

/// Apply `rule` only to fields the client sent. A field sent empty is
/// checked as missing, so it fails the "required" rule.
fn partial<T>(
    field: &str,
    update: &FieldUpdate<String>,
    errors: &mut ValidationErrors,
    rule: impl FnOnce(&str, Option<&str>, &mut ValidationErrors) -> Option<T>,
) -> Option<T> {
    match update {
        FieldUpdate::Unchanged => None,
        FieldUpdate::Cleared => rule(field, None, errors),
        FieldUpdate::Set(value) => rule(field, Some(value), errors),
    }
}

pub fn validate_update(
    request: &UpdateHotelRequest,
    policy: &PhotoPolicy,
) -> Result<(HotelChanges, Option<ValidatedPhoto>), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let changes = HotelChanges {
        name: partial("name", &request.name, &mut errors, |f, v, e| {
            rules::text(f, v, rules::NAME_MAX_CHARS, e)
        }),
        address: partial("address", &request.address, &mut errors, |f, v, e| {
            rules::text(f, v, rules::ADDRESS_MAX_CHARS, e)
        }),
        email: partial("email", &request.email, &mut errors, rules::email),
        phone: partial("phone", &request.phone, &mut errors, |f, v, e| {
            rules::text(f, v, rules::PHONE_MAX_CHARS, e)
        }),
        price_per_night: partial(
            "price_per_night",
            &request.price_per_night,
            &mut errors,
            rules::price,
        ),
        currency: partial("currency", &request.currency, &mut errors, rules::currency),
        photo: None,
    };
    let photo = request
        .photo
        .as_ref()
        .and_then(|upload| validate_photo(upload, policy, &mut errors));

    errors.into_result((changes, photo))
}
