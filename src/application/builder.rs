use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::handlers::health_checks::ReadinessProbe;
use crate::api::router::AppState;
use crate::application::{
    ports::{HotelRepository, PhotoStore},
    use_cases::{
        CreateHotelUseCase, DeleteHotelUseCase, GetHotelUseCase, ListHotelsUseCase,
        UpdateHotelUseCase,
    },
    validation::PhotoPolicy,
};
use crate::config::Config;
use crate::infrastructure::{persistence::PostgresHotelRepository, storage::LocalPhotoStore};

type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    hotel_repo: Option<Arc<dyn HotelRepository>>,
    photo_store: Option<Arc<dyn PhotoStore>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            hotel_repo: None,
            photo_store: None,
        }
    }

    /// Initialize database connection pool with retry logic and run migrations
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Use an existing pool instead of connecting (migrations are not run)
    pub fn with_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Initialize infrastructure layer (repository and photo store)
    pub async fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        let hotel_repo: Arc<dyn HotelRepository> =
            Arc::new(PostgresHotelRepository::new(pool.clone()));

        let photo_store = Arc::new(LocalPhotoStore::new(
            self.config.photo_storage_root.clone(),
            self.config.public_base_url.clone(),
        ));
        photo_store.init().await?;
        info!(
            root = %photo_store.root().display(),
            public_base_url = %self.config.public_base_url,
            "Photo store initialized"
        );

        self.hotel_repo = Some(hotel_repo);
        self.photo_store = Some(photo_store);

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Plug in port implementations directly; used by tests and tools
    pub fn with_ports(
        mut self,
        hotel_repo: Arc<dyn HotelRepository>,
        photo_store: Arc<dyn PhotoStore>,
    ) -> Self {
        self.hotel_repo = Some(hotel_repo);
        self.photo_store = Some(photo_store);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let hotel_repo = self.hotel_repo.ok_or("Hotel repository not initialized")?;
        let photo_store = self.photo_store.ok_or("Photo store not initialized")?;
        let photo_policy = PhotoPolicy::new(self.config.max_upload_bytes);

        let list_hotels_use_case = Arc::new(ListHotelsUseCase::new(
            Arc::clone(&hotel_repo),
            Arc::clone(&photo_store),
        ));
        let create_hotel_use_case = Arc::new(CreateHotelUseCase::new(
            Arc::clone(&hotel_repo),
            Arc::clone(&photo_store),
            photo_policy.clone(),
        ));
        let get_hotel_use_case = Arc::new(GetHotelUseCase::new(
            Arc::clone(&hotel_repo),
            Arc::clone(&photo_store),
        ));
        let update_hotel_use_case = Arc::new(UpdateHotelUseCase::new(
            Arc::clone(&hotel_repo),
            Arc::clone(&photo_store),
            photo_policy,
        ));
        let delete_hotel_use_case = Arc::new(DeleteHotelUseCase::new(
            Arc::clone(&hotel_repo),
            Arc::clone(&photo_store),
        ));

        info!("Application layer initialized");

        Ok(AppState {
            list_hotels_use_case,
            create_hotel_use_case,
            get_hotel_use_case,
            update_hotel_use_case,
            delete_hotel_use_case,
            readiness: ReadinessProbe::new(hotel_repo, photo_store),
            config: self.config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
