use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::handlers::health_checks::ReadinessProbe;
use crate::api::handlers::{
    create_hotel_handler, current_user_handler, delete_hotel_handler, health_handler,
    list_hotels_handler, readiness_handler, show_hotel_handler, update_hotel_handler,
    update_hotel_via_form_handler,
};
use crate::api::middleware::{auth, cors, metrics};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::{
    CreateHotelUseCase, DeleteHotelUseCase, GetHotelUseCase, ListHotelsUseCase,
    UpdateHotelUseCase,
};
use crate::config::Config;
use crate::domain::value_objects::PhotoNamespace;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub list_hotels_use_case: Arc<ListHotelsUseCase>,
    pub create_hotel_use_case: Arc<CreateHotelUseCase>,
    pub get_hotel_use_case: Arc<GetHotelUseCase>,
    pub update_hotel_use_case: Arc<UpdateHotelUseCase>,
    pub delete_hotel_use_case: Arc<DeleteHotelUseCase>,
    pub readiness: ReadinessProbe,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let update_state = Arc::clone(&state.update_hotel_use_case);
    let auth_config = Arc::new(auth::AuthConfig::from_config(&state.config));
    // Only the namespace dir is published; staging files under the root stay private
    let hotels = PhotoNamespace::hotels();
    let photos_route = format!("/storage/{}", hotels.as_str());
    let photos_dir = state.config.photo_storage_root.join(hotels.as_str());

    Router::new()
        // Health checks (no auth required)
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.readiness.clone()),
        )
        // Hotels
        .route(
            "/hotels",
            get(list_hotels_handler).with_state(state.list_hotels_use_case),
        )
        .route(
            "/hotels",
            post(create_hotel_handler).with_state(state.create_hotel_use_case),
        )
        .route(
            "/hotels/{id}",
            get(show_hotel_handler).with_state(state.get_hotel_use_case),
        )
        .route(
            "/hotels/{id}",
            put(update_hotel_handler)
                .patch(update_hotel_handler)
                .with_state(Arc::clone(&update_state)),
        )
        .route(
            "/hotels/{id}",
            post(update_hotel_via_form_handler).with_state(update_state),
        )
        .route(
            "/hotels/{id}",
            axum::routing::delete(delete_hotel_handler).with_state(state.delete_hotel_use_case),
        )
        .route("/user", get(current_user_handler))
        // Published photos
        .nest_service(&photos_route, ServeDir::new(photos_dir))
        .merge(swagger_ui())
        .layer(DefaultBodyLimit::max(state.config.max_request_bytes))
        // Apply middleware layers (auth + metrics + cors)
        .layer(axum_middleware::from_fn_with_state(
            auth_config,
            auth::auth_middleware,
        ))
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
        .layer(cors::create_cors_layer_for_config(&state.config))
}
