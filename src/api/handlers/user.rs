use axum::{response::Json, Extension};

use crate::api::errors::ErrorResponse;
use crate::domain::authorization::CallerIdentity;

/// GET /user
/// Identity behind the presented credentials
#[utoipa::path(
    get,
    path = "/user",
    tag = "auth",
    responses(
        (status = 200, description = "Authenticated caller", body = CallerIdentity),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = []))
)]
pub async fn current_user_handler(Extension(caller): Extension<CallerIdentity>) -> Json<CallerIdentity> {
    Json(caller)
}
