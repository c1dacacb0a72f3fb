use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use std::sync::Arc;

use super::hotel_form::HotelForm;
use crate::api::errors::{ApiError, ErrorResponse, ValidationErrorResponse};
use crate::api::openapi::HotelFormDoc;
use crate::application::dto::{DeletedResponse, HotelDto};
use crate::application::use_cases::{
    CreateHotelUseCase, DeleteHotelUseCase, GetHotelUseCase, ListHotelsUseCase,
    UpdateHotelUseCase,
};
use crate::domain::authorization::CallerIdentity;
use crate::domain::value_objects::HotelId;

/// Anything that is not a positive integer can't name a hotel
fn parse_hotel_id(raw: &str) -> Result<HotelId, ApiError> {
    raw.parse::<HotelId>()
        .map_err(|_| ApiError::not_found("Hotel not found"))
}

/// GET /hotels
/// All hotels, newest first
#[utoipa::path(
    get,
    path = "/hotels",
    tag = "hotels",
    responses(
        (status = 200, description = "Hotels, newest first", body = [HotelDto]),
        (status = 401, description = "Unauthenticated (when reads are protected)", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = []))
)]
pub async fn list_hotels_handler(
    State(use_case): State<Arc<ListHotelsUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<Vec<HotelDto>>, ApiError> {
    let hotels = use_case.execute(&caller).await?;
    Ok(Json(hotels))
}

/// POST /hotels
/// Create a hotel from a multipart form
#[utoipa::path(
    post,
    path = "/hotels",
    tag = "hotels",
    request_body(content = HotelFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Hotel created", body = HotelDto),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = []))
)]
pub async fn create_hotel_handler(
    State(use_case): State<Arc<CreateHotelUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<HotelDto>), ApiError> {
    let form = HotelForm::parse(multipart).await?;
    let hotel = use_case.execute(&caller, form.into_create_request()).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// GET /hotels/{id}
#[utoipa::path(
    get,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel found", body = HotelDto),
        (status = 401, description = "Unauthenticated (when reads are protected)", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = []), ("api_key" = []))
)]
pub async fn show_hotel_handler(
    State(use_case): State<Arc<GetHotelUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> Result<Json<HotelDto>, ApiError> {
    let id = parse_hotel_id(&id)?;
    let hotel = use_case.execute(&caller, id).await?;
    Ok(Json(hotel))
}

/// PUT|PATCH /hotels/{id}
/// Partial update: only the fields present in the form are changed
#[utoipa::path(
    method(put, patch),
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    request_body(content = HotelFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Hotel updated", body = HotelDto),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = []))
)]
pub async fn update_hotel_handler(
    State(use_case): State<Arc<UpdateHotelUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<HotelDto>, ApiError> {
    let id = parse_hotel_id(&id)?;
    let form = HotelForm::parse(multipart).await?;
    let hotel = use_case
        .execute(&caller, id, form.into_update_request())
        .await?;
    Ok(Json(hotel))
}

/// POST /hotels/{id}
/// Update for clients that can only POST multipart; requires `_method=PUT`
/// (or `PATCH`) in the form
#[utoipa::path(
    post,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    request_body(content = HotelFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Hotel updated", body = HotelDto),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 405, description = "Missing or unsupported _method", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = []))
)]
pub async fn update_hotel_via_form_handler(
    State(use_case): State<Arc<UpdateHotelUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<HotelDto>, ApiError> {
    let form = HotelForm::parse(multipart).await?;
    if !form.overrides_to_update() {
        return Err(ApiError::method_not_allowed(
            "The POST method is not supported for this route. Send _method=PUT.",
        ));
    }

    let id = parse_hotel_id(&id)?;
    let hotel = use_case
        .execute(&caller, id, form.into_update_request())
        .await?;
    Ok(Json(hotel))
}

/// DELETE /hotels/{id}
#[utoipa::path(
    delete,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel deleted", body = DeletedResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("api_key" = []))
)]
pub async fn delete_hotel_handler(
    State(use_case): State<Arc<DeleteHotelUseCase>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_hotel_id(&id)?;
    let response = use_case.execute(&caller, id).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hotel_id() {
        assert_eq!(parse_hotel_id("42").unwrap().as_i64(), 42);

        for invalid in ["abc", "0", "-3", "1.5", ""] {
            let err = parse_hotel_id(invalid).unwrap_err();
            assert_eq!(err.status(), StatusCode::NOT_FOUND, "id {:?}", invalid);
        }
    }
}
