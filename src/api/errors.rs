use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::api::handlers::health_checks::sanitize_repository_error;
use crate::application::errors::HotelUseCaseError;
use crate::domain::errors::ValidationErrors;

/// Body of every non-validation error
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Hotel not found")]
    pub error: String,
}

/// Body of a 422 response
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(example = "The currency field must be 3 characters.")]
    pub message: String,
    /// Field name -> messages
    #[schema(value_type = Object, example = json!({"currency": ["The currency field must be 3 characters."]}))]
    pub errors: ValidationErrors,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<ValidationErrors>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthenticated.")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: errors.to_string(),
            errors: Some(errors),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.errors {
            Some(errors) => Json(json!({
                "message": self.message,
                "errors": errors,
            })),
            None => Json(json!({
                "error": self.message,
            })),
        };

        (self.status, body).into_response()
    }
}

impl From<HotelUseCaseError> for ApiError {
    fn from(err: HotelUseCaseError) -> Self {
        match err {
            HotelUseCaseError::Validation(errors) => ApiError::validation(errors),
            HotelUseCaseError::NotFound(_) => ApiError::not_found("Hotel not found"),
            HotelUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Repository failure");
                ApiError::internal_error(sanitize_repository_error(&e))
            }
            HotelUseCaseError::Storage(e) => {
                tracing::error!(error = %e, "Photo storage failure");
                ApiError::internal_error("Photo storage error")
            }
        }
    }
}
