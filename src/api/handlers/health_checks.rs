//! Health check utilities and logic

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{HotelRepository, PhotoStore, RepositoryError};

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Dependencies the readiness probe talks to
#[derive(Clone)]
pub struct ReadinessProbe {
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub photo_store: Arc<dyn PhotoStore>,
}

/// Result of readiness checks
#[derive(Debug)]
pub struct ReadinessCheckResult {
    pub healthy: bool,
    pub database: &'static str,
    pub photo_storage: &'static str,
    pub issues: Vec<String>,
}

impl ReadinessProbe {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>, photo_store: Arc<dyn PhotoStore>) -> Self {
        Self {
            hotel_repo,
            photo_store,
        }
    }

    /// Check the database (bounded by a 2s timeout) and the photo store
    pub async fn check(&self) -> ReadinessCheckResult {
        let mut issues = Vec::new();

        let database = match tokio::time::timeout(DB_CHECK_TIMEOUT, self.hotel_repo.ping()).await
        {
            Ok(Ok(())) => "connected",
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Readiness: database check failed");
                issues.push(format!("Database error: {}", sanitize_repository_error(&e)));
                "disconnected"
            }
            Err(_) => {
                issues.push("Database query timed out after 2 seconds".to_string());
                "timeout"
            }
        };

        let photo_storage = match self.photo_store.health_check().await {
            Ok(()) => "writable",
            Err(e) => {
                tracing::warn!(error = %e, "Readiness: photo store check failed");
                issues.push("Photo storage is not writable".to_string());
                "unavailable"
            }
        };

        ReadinessCheckResult {
            healthy: issues.is_empty(),
            database,
            photo_storage,
            issues,
        }
    }
}

/// Sanitize database error messages to prevent information leakage
pub fn sanitize_db_error(error: &sqlx::Error) -> String {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error".to_string(),
        sqlx::Error::Database(_) => "Database operation error".to_string(),
        sqlx::Error::Io(_) => "Database connection error".to_string(),
        sqlx::Error::Tls(_) => "Database TLS error".to_string(),
        sqlx::Error::Protocol(_) => "Database protocol error".to_string(),
        sqlx::Error::RowNotFound => "Record not found".to_string(),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            "Database decode error".to_string()
        }
        sqlx::Error::PoolTimedOut => "Database timeout".to_string(),
        sqlx::Error::PoolClosed => "Database connection closed".to_string(),
        _ => "Database error".to_string(),
    }
}

/// Client-safe description of a repository failure
pub fn sanitize_repository_error(error: &RepositoryError) -> String {
    match error {
        RepositoryError::Database(e) => sanitize_db_error(e),
        RepositoryError::ConstraintViolation(_) => "Database constraint violation".to_string(),
        RepositoryError::CorruptRow(_) | RepositoryError::Internal(_) => {
            "Internal server error".to_string()
        }
    }
}
