use serde::Serialize;
use utoipa::ToSchema;

/// How a caller proved who they are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    Jwt,
    ApiKey,
    /// Authentication switched off by configuration (development only)
    Disabled,
    Anonymous,
}

/// Identity of the caller of a use case.
///
/// Built by the auth middleware for each request and passed down
/// explicitly; nothing in the crate reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CallerIdentity {
    pub subject: String,
    pub method: AuthMethod,
}

impl CallerIdentity {
    pub fn from_jwt(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            method: AuthMethod::Jwt,
        }
    }

    /// API keys are identified by their position in the configured list so
    /// the secret itself never reaches the logs
    pub fn from_api_key(index: usize) -> Self {
        Self {
            subject: format!("api_key:{}", index),
            method: AuthMethod::ApiKey,
        }
    }

    pub fn auth_disabled() -> Self {
        Self {
            subject: "dev".to_string(),
            method: AuthMethod::Disabled,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            subject: "anonymous".to_string(),
            method: AuthMethod::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.method != AuthMethod::Anonymous
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.subject)
    }
}
