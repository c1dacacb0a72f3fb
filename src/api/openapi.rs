use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::errors::{ErrorResponse, ValidationErrorResponse};
use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{DeletedResponse, HotelDto};
use crate::domain::authorization::{AuthMethod, CallerIdentity};

/// Multipart body accepted by the hotel write endpoints. Documentation only;
/// the handlers parse the form by hand.
#[derive(ToSchema)]
#[schema(as = HotelForm)]
#[allow(dead_code)]
pub struct HotelFormDoc {
    #[schema(example = "Hotel Lagon")]
    name: Option<String>,
    #[schema(example = "Route de la Corniche Est, Dakar")]
    address: Option<String>,
    #[schema(example = "contact@lagon.sn")]
    email: Option<String>,
    #[schema(example = "+221 33 889 25 25")]
    phone: Option<String>,
    #[schema(example = "120.00")]
    price_per_night: Option<String>,
    #[schema(example = "EUR")]
    currency: Option<String>,
    /// jpeg, png, gif, bmp or webp
    #[schema(value_type = Option<String>, format = Binary)]
    photo: Option<Vec<u8>>,
    /// `PUT` or `PATCH`, only meaningful on `POST /hotels/{id}`
    #[schema(example = "PUT")]
    _method: Option<String>,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "ApiKey <key>",
                ))),
            );
        }
    }
}

/// OpenAPI specification for the Hotel Admin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Admin API",
        version = "1.0.0",
        description = "Administration of hotel properties: details, nightly price and photo"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::hotels::list_hotels_handler,
        crate::api::handlers::hotels::create_hotel_handler,
        crate::api::handlers::hotels::show_hotel_handler,
        crate::api::handlers::hotels::update_hotel_handler,
        crate::api::handlers::hotels::update_hotel_via_form_handler,
        crate::api::handlers::hotels::delete_hotel_handler,
        crate::api::handlers::user::current_user_handler,
    ),
    components(
        schemas(
            HotelDto,
            HotelFormDoc,
            DeletedResponse,
            ErrorResponse,
            ValidationErrorResponse,
            CallerIdentity,
            AuthMethod,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "hotels", description = "Hotel management"),
        (name = "auth", description = "Caller identity")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
