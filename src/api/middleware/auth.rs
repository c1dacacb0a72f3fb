use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::config::Config;
use crate::domain::authorization::CallerIdentity;

/// Claims accepted in a bearer token; issuance happens elsewhere
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID or email)
    pub exp: usize,  // Expiration time
}

/// Credentials and route policy used by [`auth_middleware`]
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub api_keys: Vec<String>,
    pub disabled: bool,
    pub public_reads: bool,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            api_keys: config.api_keys.clone(),
            disabled: config.disable_auth,
            public_reads: config.public_reads,
        }
    }

    /// Routes reachable without credentials
    fn is_public(&self, method: &Method, path: &str) -> bool {
        if path == "/health"
            || path.starts_with("/health/")
            || path.starts_with("/storage/")
            || path.starts_with("/api-docs")
            || path.starts_with("/swagger-ui")
        {
            return true;
        }

        let is_read = method == Method::GET || method == Method::HEAD;
        self.public_reads && is_read && is_hotel_route(path)
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<CallerIdentity, ApiError> {
        let auth_header = headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;

        if let Some(api_key) = auth_header.strip_prefix("ApiKey ") {
            return self.validate_api_key(api_key.trim());
        }

        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let claims = self.validate_jwt(token.trim())?;
            return Ok(CallerIdentity::from_jwt(claims.sub));
        }

        Err(ApiError::unauthorized())
    }

    /// Validate API key against configured keys
    fn validate_api_key(&self, api_key: &str) -> Result<CallerIdentity, ApiError> {
        if api_key.is_empty() {
            return Err(ApiError::unauthorized());
        }

        self.api_keys
            .iter()
            .position(|key| key == api_key)
            .map(CallerIdentity::from_api_key)
            .ok_or_else(ApiError::unauthorized)
    }

    /// Validate JWT token
    fn validate_jwt(&self, token: &str) -> Result<Claims, ApiError> {
        let secret = self.jwt_secret.as_ref().ok_or_else(ApiError::unauthorized)?;

        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::unauthorized()
        })?;

        Ok(token_data.claims)
    }
}

/// `/hotels` and `/hotels/{id}`
fn is_hotel_route(path: &str) -> bool {
    match path.strip_prefix("/hotels") {
        Some("") | Some("/") => true,
        Some(rest) => rest
            .strip_prefix('/')
            .is_some_and(|id| !id.is_empty() && !id.contains('/')),
        None => false,
    }
}

/// Authentication middleware supporting JWT and API keys.
///
/// Inserts the resolved [`CallerIdentity`] as a request extension; public
/// routes without valid credentials get an anonymous identity.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = if auth.disabled {
        CallerIdentity::auth_disabled()
    } else if auth.is_public(request.method(), request.uri().path()) {
        auth.authenticate(request.headers())
            .unwrap_or_else(|_| CallerIdentity::anonymous())
    } else {
        auth.authenticate(request.headers()).inspect_err(|_| {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                "Unauthenticated request rejected"
            );
        })?
    };

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
