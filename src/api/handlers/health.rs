use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use std::time::Instant;
use utoipa::ToSchema;

use super::health_checks::ReadinessProbe;

const SERVICE_NAME: &str = "hotel_admin";

/// Basic health check response
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy"
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Readiness response
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// "ready" or "not_ready"
    pub status: String,
    pub service: String,
    /// "connected", "disconnected" or "timeout"
    pub database: String,
    /// "writable" or "unavailable"
    pub photo_storage: String,
    /// Joined failure reasons, only present when not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub response_time_ms: u64,
}

/// GET /health
/// Liveness check, touches no dependency
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }),
    )
}

/// GET /health/ready
/// Readiness probe: database round trip and photo store write check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(probe): State<ReadinessProbe>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let start_time = Instant::now();
    let result = probe.check().await;
    let response_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (status, label, error) = if result.healthy {
        (StatusCode::OK, "ready", None)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            Some(result.issues.join("; ")),
        )
    };

    (
        status,
        Json(ReadinessResponse {
            status: label.to_string(),
            service: SERVICE_NAME.to_string(),
            database: result.database.to_string(),
            photo_storage: result.photo_storage.to_string(),
            error,
            timestamp: Utc::now(),
            response_time_ms,
        }),
    )
}
