//! Integration tests using TestContainers
//!
//! Runs the PostgreSQL repository against a real database with the crate's
//! migrations applied. Needs a Docker daemon, so ignored by default:
//! `cargo test -- --ignored`.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgPool;
use testcontainers_modules::{postgres::Postgres, testcontainers::runners::AsyncRunner};

use hotel_admin::{
    entities::{HotelChanges, NewHotel},
    infrastructure::persistence::PostgresHotelRepository,
    ports::{HotelRepository, RepositoryError},
    value_objects::{CurrencyCode, HotelId, Price},
};

/// Test environment using TestContainers
struct TestEnvironment {
    pool: PgPool,
    repo: PostgresHotelRepository,
    _container: testcontainers::ContainerAsync<Postgres>,
}

impl TestEnvironment {
    async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get container host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            repo: PostgresHotelRepository::new(pool.clone()),
            pool,
            _container: container,
        }
    }
}

fn new_hotel(name: &str, price: &str) -> NewHotel {
    NewHotel::new(
        name.to_string(),
        "Plateau, Dakar".to_string(),
        Some("desk@example.com".to_string()),
        Some("+221 33 123 45 67".to_string()),
        Price::new(Decimal::from_str(price).unwrap()).unwrap(),
        CurrencyCode::new("XOF").unwrap(),
    )
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_and_find() {
    let env = TestEnvironment::new().await;

    let inserted = env.repo.insert(&new_hotel("Terrou-Bi", "120.5")).await.unwrap();
    assert!(inserted.id().as_i64() > 0);
    assert_eq!(inserted.price_per_night().to_string(), "120.50");
    assert_eq!(inserted.created_at(), inserted.updated_at());

    let found = env.repo.find_by_id(inserted.id()).await.unwrap().unwrap();
    assert_eq!(found, inserted);

    let missing = env.repo.find_by_id(HotelId::new(999_999).unwrap()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_list_newest_first() {
    let env = TestEnvironment::new().await;

    let first = env.repo.insert(&new_hotel("First", "10")).await.unwrap();
    let second = env.repo.insert(&new_hotel("Second", "20")).await.unwrap();

    let ids: Vec<i64> = env
        .repo
        .find_all_ordered_by_created_desc()
        .await
        .unwrap()
        .iter()
        .map(|h| h.id().as_i64())
        .collect();
    assert_eq!(ids, vec![second.id().as_i64(), first.id().as_i64()]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_fields_touches_only_supplied_columns() {
    let env = TestEnvironment::new().await;
    let inserted = env.repo.insert(&new_hotel("Lagon", "75")).await.unwrap();

    let mut changes = HotelChanges::default();
    changes.name = Some("Lagon II".to_string());
    changes.price_per_night = Some(Price::new(Decimal::from_str("80.25").unwrap()).unwrap());
    let updated = env
        .repo
        .update_fields(inserted.id(), &changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name(), "Lagon II");
    assert_eq!(updated.price_per_night().to_string(), "80.25");
    assert_eq!(updated.address(), inserted.address());
    assert_eq!(updated.email(), inserted.email());
    assert_eq!(updated.created_at(), inserted.created_at());
    assert!(updated.updated_at() >= inserted.updated_at());

    let gone = env
        .repo
        .update_fields(HotelId::new(999_999).unwrap(), &changes)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_delete_by_id() {
    let env = TestEnvironment::new().await;
    let inserted = env.repo.insert(&new_hotel("Ghost", "1")).await.unwrap();

    assert!(env.repo.delete_by_id(inserted.id()).await.unwrap());
    assert!(!env.repo.delete_by_id(inserted.id()).await.unwrap());
    assert!(env.repo.find_by_id(inserted.id()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_check_constraints_reject_bad_rows() {
    let env = TestEnvironment::new().await;
    env.repo.ping().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO hotels (name, address, price_per_night, currency) VALUES ('x', 'y', -1, 'EUR')",
    )
    .execute(&env.pool)
    .await;
    assert!(result.is_err());

    let result = env.repo.insert(&new_hotel("   ", "5")).await;
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}
