use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

/// CORS configuration for production: explicit origin list
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(std::time::Duration::from_secs(86400)) // 24 hours
}

/// CORS configuration for development (any origin, no credentials)
pub fn create_development_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Select appropriate CORS layer based on environment
pub fn create_cors_layer_for_config(config: &Config) -> CorsLayer {
    if config.is_development() {
        create_development_cors_layer()
    } else {
        create_cors_layer(&config.allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<String> {
        let app = Router::new().route("/hotels", get(|| async { "ok" })).layer(layer);
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/hotels")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_listed_origin_is_allowed() {
        let layer = create_cors_layer(&["https://admin.example.com".to_string()]);
        assert_eq!(
            preflight(layer, "https://admin.example.com").await.as_deref(),
            Some("https://admin.example.com")
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_refused() {
        let layer = create_cors_layer(&["https://admin.example.com".to_string()]);
        assert!(preflight(layer, "https://evil.example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_development_allows_any_origin() {
        let layer = create_development_cors_layer();
        assert_eq!(
            preflight(layer, "http://localhost:5173").await.as_deref(),
            Some("*")
        );
    }

    #[test]
    fn test_layer_selected_from_config() {
        let config = Config::from_lookup(|key| match key {
            "ENVIRONMENT" => Some("production".to_string()),
            "ALLOWED_ORIGINS" => Some("https://admin.example.com,bad\u{1}origin".to_string()),
            _ => None,
        });
        // Invalid entries are skipped rather than failing startup
        let _layer = create_cors_layer_for_config(&config);
    }
}
