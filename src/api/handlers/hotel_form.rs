//! Multipart form parsing for the hotel write endpoints

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::application::dto::{CreateHotelRequest, PhotoUpload, UpdateHotelRequest};
use crate::domain::value_objects::FieldUpdate;

/// Form field carrying the browser method override
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Whitelisted fields of a hotel form, as sent by the client
#[derive(Debug, Default)]
pub struct HotelForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub price_per_night: Option<String>,
    pub currency: Option<String>,
    pub photo: Option<PhotoUpload>,
    /// Upper-cased `_method` value, if any
    pub method_override: Option<String>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::new(e.status(), e.body_text())
}

impl HotelForm {
    /// Accepts the extractor result so a missing or malformed multipart body
    /// is answered with the usual JSON error shape
    pub async fn parse(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        let multipart = multipart.map_err(|r| ApiError::new(r.status(), r.body_text()))?;
        Self::from_multipart(multipart).await
    }

    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "photo" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;

                    // Browsers send an empty, nameless part when no file was picked
                    if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                        continue;
                    }
                    form.photo = Some(PhotoUpload {
                        bytes,
                        file_name,
                        content_type,
                    });
                }
                METHOD_OVERRIDE_FIELD => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.method_override = Some(value.trim().to_uppercase());
                }
                _ => match form.text_slot(&name) {
                    Some(slot) => {
                        *slot = Some(field.text().await.map_err(multipart_error)?);
                    }
                    None => debug!(field = %name, "Ignoring unknown form field"),
                },
            }
        }

        Ok(form)
    }

    fn text_slot(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "name" => Some(&mut self.name),
            "address" => Some(&mut self.address),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "price_per_night" => Some(&mut self.price_per_night),
            "currency" => Some(&mut self.currency),
            _ => None,
        }
    }

    /// True when `_method` asks for PUT or PATCH
    pub fn overrides_to_update(&self) -> bool {
        matches!(self.method_override.as_deref(), Some("PUT") | Some("PATCH"))
    }

    pub fn into_create_request(self) -> CreateHotelRequest {
        CreateHotelRequest {
            name: self.name,
            address: self.address,
            email: self.email,
            phone: self.phone,
            price_per_night: self.price_per_night,
            currency: self.currency,
            photo: self.photo,
        }
    }

    pub fn into_update_request(self) -> UpdateHotelRequest {
        UpdateHotelRequest {
            name: FieldUpdate::from_input(self.name),
            address: FieldUpdate::from_input(self.address),
            email: FieldUpdate::from_input(self.email),
            phone: FieldUpdate::from_input(self.phone),
            price_per_night: FieldUpdate::from_input(self.price_per_night),
            currency: FieldUpdate::from_input(self.currency),
            photo: self.photo,
        }
    }
}
