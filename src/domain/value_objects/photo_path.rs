use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::PhotoNamespace;

static PHOTO_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_-]{1,64}/[A-Za-z0-9_-]{1,128}(\.[A-Za-z0-9]{1,8})?$")
        .expect("Invalid photo path regex")
});

/// Store-relative location of a photo blob: `<namespace>/<file name>`.
///
/// Never absolute and never contains `..`, so it can be joined onto the
/// store root safely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoPath(String);

impl PhotoPath {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if !PHOTO_PATH_REGEX.is_match(&value) {
            return Err(DomainError::InvalidPhotoPath(value));
        }
        Ok(Self(value))
    }

    pub fn from_parts(namespace: &PhotoNamespace, file_name: &str) -> Result<Self, DomainError> {
        Self::new(format!("{}/{}", namespace.as_str(), file_name))
    }

    pub fn namespace(&self) -> &str {
        self.0.split_once('/').map(|(ns, _)| ns).unwrap_or_default()
    }

    pub fn file_name(&self) -> &str {
        self.0.split_once('/').map(|(_, file)| file).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhotoPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
