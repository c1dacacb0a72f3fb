//! Field rules shared by the create and update paths
//!
//! Each rule records human readable messages into a [`ValidationErrors`]
//! map instead of returning on the first failure, so a client gets every
//! problem with its form in one response.

use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::value_objects::{CurrencyCode, Price};

pub const NAME_MAX_CHARS: usize = 255;
pub const ADDRESS_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PHONE_MAX_CHARS: usize = 50;

/// Message templates
pub mod messages {
    pub fn required(field: &str) -> String {
        format!("The {} field is required.", field)
    }

    pub fn max_chars(field: &str, max: usize) -> String {
        format!(
            "The {} field must not be greater than {} characters.",
            field, max
        )
    }

    pub fn email(field: &str) -> String {
        format!("The {} field must be a valid email address.", field)
    }

    pub fn numeric(field: &str) -> String {
        format!("The {} field must be a number.", field)
    }

    pub fn min_number(field: &str, min: impl std::fmt::Display) -> String {
        format!("The {} field must be at least {}.", field, min)
    }

    pub fn max_number(field: &str, max: impl std::fmt::Display) -> String {
        format!("The {} field must not be greater than {}.", field, max)
    }

    pub fn exact_chars(field: &str, size: usize) -> String {
        format!("The {} field must be {} characters.", field, size)
    }

    pub fn image(field: &str) -> String {
        format!("The {} field must be an image.", field)
    }

    pub fn max_kilobytes(field: &str, max_kb: usize) -> String {
        format!(
            "The {} field must not be greater than {} kilobytes.",
            field, max_kb
        )
    }
}

/// Trimmed, non-blank view of a raw input value
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Required text with a maximum length in characters
pub fn text(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(value) = present(value) else {
        errors.add(field, messages::required(field));
        return None;
    };

    if value.chars().count() > max_chars {
        errors.add(field, messages::max_chars(field, max_chars));
        return None;
    }

    Some(value.to_string())
}

/// Required, syntactically valid email address
pub fn email(field: &str, value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let Some(value) = present(value) else {
        errors.add(field, messages::required(field));
        return None;
    };

    let mut valid = true;
    if !value.validate_email() {
        errors.add(field, messages::email(field));
        valid = false;
    }
    if value.chars().count() > EMAIL_MAX_CHARS {
        errors.add(field, messages::max_chars(field, EMAIL_MAX_CHARS));
        valid = false;
    }

    valid.then(|| value.to_string())
}

/// Required non-negative number, rounded to two fractional digits
pub fn price(field: &str, value: Option<&str>, errors: &mut ValidationErrors) -> Option<Price> {
    let Some(value) = present(value) else {
        errors.add(field, messages::required(field));
        return None;
    };

    let Some(decimal) = Price::parse_decimal(value) else {
        errors.add(field, messages::numeric(field));
        return None;
    };

    match Price::new(decimal) {
        Ok(price) => Some(price),
        Err(DomainError::NegativePrice(_)) => {
            errors.add(field, messages::min_number(field, Decimal::ZERO));
            None
        }
        Err(_) => {
            errors.add(field, messages::max_number(field, Price::max()));
            None
        }
    }
}

/// Required code of exactly three characters
pub fn currency(
    field: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<CurrencyCode> {
    let Some(value) = present(value) else {
        errors.add(field, messages::required(field));
        return None;
    };

    match CurrencyCode::new(value) {
        Ok(code) => Some(code),
        Err(_) => {
            errors.add(field, messages::exact_chars(field, CurrencyCode::LENGTH));
            None
        }
    }
}
