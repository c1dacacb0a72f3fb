use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid hotel ID: {0}")]
    InvalidHotelId(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Price cannot be negative: {0}")]
    NegativePrice(String),

    #[error("Price exceeds maximum allowed: {value} > {max}")]
    PriceOutOfRange { value: String, max: String },

    #[error("Invalid photo namespace: {0}")]
    InvalidNamespace(String),

    #[error("Invalid photo path: {0}")]
    InvalidPhotoPath(String),
}

/// Field name -> human readable messages, in field order.
///
/// Serializes as a plain JSON object so it can be returned as the `errors`
/// member of a 422 response without reshaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .map(String::as_str)
    }

    /// Returns `value` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.first_message() else {
            return write!(f, "The given data was invalid.");
        };

        match self.len() - 1 {
            0 => write!(f, "{}", first),
            1 => write!(f, "{} (and 1 more error)", first),
            n => write!(f, "{} (and {} more errors)", first, n),
        }
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collects_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("currency", "The currency field must be 3 characters.");
        errors.add("name", "second");

        assert_eq!(errors.len(), 3);
        assert!(errors.contains("name"));
        assert_eq!(errors.messages("name").len(), 2);
        assert!(errors.messages("phone").is_empty());
    }

    #[test]
    fn test_validation_errors_display_summarizes() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.to_string(), "The given data was invalid.");

        errors.add("currency", "The currency field must be 3 characters.");
        assert_eq!(
            errors.to_string(),
            "The currency field must be 3 characters."
        );

        errors.add("name", "The name field is required.");
        errors.add("phone", "The phone field is required.");
        assert_eq!(
            errors.to_string(),
            "The currency field must be 3 characters. (and 2 more errors)"
        );
    }

    #[test]
    fn test_validation_errors_serializes_as_map() {
        let mut errors = ValidationErrors::new();
        errors.add("price_per_night", "The price_per_night field must be at least 0.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "price_per_night": ["The price_per_night field must be at least 0."]
            })
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.add("name", "bad");
        assert!(errors.into_result(5).is_err());
    }
}
