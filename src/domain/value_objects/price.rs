use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Nightly price, non-negative, kept at two fractional digits.
///
/// Backed by a `NUMERIC(10,2)` column, so values are capped at 99999999.99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    pub const SCALE: u32 = 2;

    pub fn max() -> Decimal {
        Decimal::new(9_999_999_999, Self::SCALE)
    }

    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        // Sign is checked before rounding so "-0.004" is not taken as zero
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::NegativePrice(value.to_string()));
        }
        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded > Self::max() {
            return Err(DomainError::PriceOutOfRange {
                value: value.to_string(),
                max: Self::max().to_string(),
            });
        }
        // Normalizes "-0.00" and pads "12" to "12.00"
        rounded.set_sign_positive(true);
        rounded.rescale(Self::SCALE);
        Ok(Self(rounded))
    }

    /// Parse a user supplied numeric string ("120", "99.5", "1e2")
    pub fn parse_decimal(input: &str) -> Option<Decimal> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Prices travel as two-digit decimal strings, never as floats
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
