use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Folder inside the photo store that groups related blobs (e.g. "hotels")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoNamespace(String);

impl PhotoNamespace {
    const MAX_LENGTH: usize = 64;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::InvalidNamespace(
                "Namespace cannot be empty".to_string(),
            ));
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidNamespace(format!(
                "Namespace too long: {} > {}",
                value.len(),
                Self::MAX_LENGTH
            )));
        }

        // Must be alphanumeric with underscores/hyphens
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::InvalidNamespace(
                "Namespace must be alphanumeric with underscores/hyphens".to_string(),
            ));
        }

        Ok(Self(value.to_lowercase()))
    }

    /// Namespace used for hotel photos
    pub fn hotels() -> Self {
        Self("hotels".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhotoNamespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
