//! # Hotel Admin - Hotel Catalogue REST API
//!
//! Administrative JSON API for a catalogue of hotels, each with an optional
//! photo kept on local disk and served from a public URL.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Hotel entity, value objects, field rules
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: PostgreSQL repository and filesystem photo store
//! - **API**: HTTP handlers, multipart form parsing and middleware
//!
//! ## Key Features
//!
//! - Create, list, show, partially update and delete hotels
//! - Photo uploads validated by content, replaced and removed with the record
//! - Per-field validation messages returned as a single 422 response
//! - JWT and API key authentication
//!
//! ## Example Usage
//!
//! ```no_run
//! use hotel_admin::{application::builder::ApplicationBuilder, create_router, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Config::from_env();
//! let state = ApplicationBuilder::new(config)
//!     .with_database()
//!     .await?
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::create_router;
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
