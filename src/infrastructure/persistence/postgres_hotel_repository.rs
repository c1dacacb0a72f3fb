use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::application::ports::{HotelRepository, RepositoryError};
use crate::domain::entities::{Hotel, HotelChanges, NewHotel};
use crate::domain::value_objects::{CurrencyCode, HotelId, PhotoPath, Price};

const HOTEL_COLUMNS: &str = "id, name, address, email, phone, price_per_night, currency, \
                             photo, created_at, updated_at";

pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Surface CHECK constraint failures as their own variant so callers can
/// tell bad data from a broken connection
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_check_violation() {
            return RepositoryError::ConstraintViolation(
                db_err.constraint().unwrap_or("unknown").to_string(),
            );
        }
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO hotels (name, address, email, phone, price_per_night, currency, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            HOTEL_COLUMNS
        );

        let row = sqlx::query_as::<_, HotelRow>(&sql)
            .bind(&hotel.name)
            .bind(&hotel.address)
            .bind(&hotel.email)
            .bind(&hotel.phone)
            .bind(hotel.price_per_night.as_decimal())
            .bind(hotel.currency.as_str())
            .bind(hotel.photo().map(|p| p.as_str()))
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.into_domain()
    }

    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, RepositoryError> {
        let sql = format!("SELECT {} FROM hotels WHERE id = $1", HOTEL_COLUMNS);

        let row = sqlx::query_as::<_, HotelRow>(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn find_all_ordered_by_created_desc(&self) -> Result<Vec<Hotel>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM hotels ORDER BY created_at DESC, id DESC",
            HOTEL_COLUMNS
        );

        let rows = sqlx::query_as::<_, HotelRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn update_fields(
        &self,
        id: HotelId,
        changes: &HotelChanges,
    ) -> Result<Option<Hotel>, RepositoryError> {
        let mut query = build_update(id, changes);

        let row = query
            .build_query_as::<HotelRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: HotelId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `UPDATE` touching only the supplied columns, plus `updated_at`
fn build_update<'a>(id: HotelId, changes: &'a HotelChanges) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE hotels SET ");
    let mut set = query.separated(", ");

    if let Some(name) = &changes.name {
        set.push("name = ").push_bind_unseparated(name.as_str());
    }
    if let Some(address) = &changes.address {
        set.push("address = ").push_bind_unseparated(address.as_str());
    }
    if let Some(email) = &changes.email {
        set.push("email = ").push_bind_unseparated(email.as_str());
    }
    if let Some(phone) = &changes.phone {
        set.push("phone = ").push_bind_unseparated(phone.as_str());
    }
    if let Some(price) = changes.price_per_night {
        set.push("price_per_night = ")
            .push_bind_unseparated(price.as_decimal());
    }
    if let Some(currency) = &changes.currency {
        set.push("currency = ").push_bind_unseparated(currency.as_str());
    }
    if let Some(photo) = changes.photo() {
        set.push("photo = ").push_bind_unseparated(photo.as_str());
    }
    set.push("updated_at = now()");

    query
        .push(" WHERE id = ")
        .push_bind(id.as_i64())
        .push(" RETURNING ")
        .push(HOTEL_COLUMNS);
    query
}

// Database row representation
#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i64,
    name: String,
    address: String,
    email: Option<String>,
    phone: Option<String>,
    price_per_night: Decimal,
    currency: String,
    photo: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl HotelRow {
    fn into_domain(self) -> Result<Hotel, RepositoryError> {
        let corrupt = |e: crate::domain::errors::DomainError| {
            RepositoryError::CorruptRow(format!("hotel {}: {}", self.id, e))
        };

        let price = Price::new(self.price_per_night).map_err(corrupt)?;
        let currency = CurrencyCode::new(&self.currency).map_err(corrupt)?;
        let photo = self
            .photo
            .as_deref()
            .map(PhotoPath::new)
            .transpose()
            .map_err(corrupt)?;

        Ok(Hotel::reconstruct(
            HotelId::from_db(self.id),
            self.name,
            self.address,
            self.email,
            self.phone,
            price,
            currency,
            photo,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PhotoNamespace;

    #[test]
    fn test_build_update_only_lists_supplied_columns() {
        let changes = HotelChanges {
            name: Some("Renamed".to_string()),
            price_per_night: Some(Price::new(Decimal::new(9_950, 2)).unwrap()),
            ..Default::default()
        };

        let query = build_update(HotelId::from_db(3), &changes);
        let sql = query.sql();

        assert!(sql.starts_with(
            "UPDATE hotels SET name = $1, price_per_night = $2, updated_at = now() WHERE id = $3"
        ));
        assert!(!sql.contains("address ="));
        assert!(!sql.contains("photo ="));
        assert!(sql.contains("RETURNING id, name"));
    }

    #[test]
    fn test_build_update_includes_photo() {
        let mut changes = HotelChanges::default();
        changes.replace_photo(
            PhotoPath::from_parts(&PhotoNamespace::hotels(), "new.png").unwrap(),
        );

        let query = build_update(HotelId::from_db(3), &changes);
        assert!(query
            .sql()
            .starts_with("UPDATE hotels SET photo = $1, updated_at = now() WHERE id = $2"));
    }

    #[test]
    fn test_row_with_bad_currency_is_corrupt() {
        let row = HotelRow {
            id: 1,
            name: "n".to_string(),
            address: "a".to_string(),
            email: None,
            phone: None,
            price_per_night: Decimal::new(100, 0),
            currency: "EURO".to_string(),
            photo: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert!(matches!(
            row.into_domain(),
            Err(RepositoryError::CorruptRow(_))
        ));
    }
}
