use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hotel_admin::{infrastructure::storage::PathBuilder, value_objects::PhotoPath};
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;

/// Report rows of the hotels table that violate the catalogue's rules
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Root directory of the photo store, defaults to PHOTO_STORAGE_ROOT
    #[arg(long)]
    storage_root: Option<PathBuf>,

    /// Clear photo references that point at missing or malformed files
    #[arg(long)]
    fix: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let storage_root = cli
        .storage_root
        .or_else(|| env::var("PHOTO_STORAGE_ROOT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./storage/public"));
    let paths = PathBuilder::new(storage_root);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("failed to connect to database")?;

    // Prices below zero
    let negative_prices =
        sqlx::query(r#"SELECT id, price_per_night::TEXT AS price FROM hotels WHERE price_per_night < 0"#)
            .fetch_all(&pool)
            .await?;

    println!("Negative price rows: {}", negative_prices.len());
    for r in negative_prices.iter() {
        let id: i64 = r.get("id");
        let price: String = r.get("price");
        println!("id: {}, price_per_night: {}", id, price);
    }

    // Currency codes that are not exactly three characters
    let bad_currencies =
        sqlx::query(r#"SELECT id, currency FROM hotels WHERE char_length(currency) != 3"#)
            .fetch_all(&pool)
            .await?;

    println!("Invalid currency rows: {}", bad_currencies.len());
    for r in bad_currencies.iter() {
        let id: i64 = r.get("id");
        let currency: String = r.get("currency");
        println!("id: {}, currency: {:?}", id, currency);
    }

    // Photo references whose file is gone or whose path is malformed
    let with_photo = sqlx::query(r#"SELECT id, photo FROM hotels WHERE photo IS NOT NULL"#)
        .fetch_all(&pool)
        .await?;

    let mut dangling = 0usize;
    for r in with_photo.iter() {
        let id: i64 = r.get("id");
        let photo: String = r.get("photo");

        let reason = match PhotoPath::new(photo.as_str()) {
            Ok(path) => {
                let file = paths.final_path(&path);
                match tokio::fs::try_exists(&file).await {
                    Ok(true) => continue,
                    Ok(false) => format!("missing file {}", file.display()),
                    Err(e) => format!("unreadable file {}: {}", file.display(), e),
                }
            }
            Err(e) => e.to_string(),
        };

        dangling += 1;
        println!("id: {}, photo: {}, {}", id, photo, reason);
        if cli.fix {
            sqlx::query("UPDATE hotels SET photo = NULL, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&pool)
                .await?;
            println!("Fixed: {} -> photo cleared", id);
        }
    }
    println!("Dangling photo rows: {}", dangling);

    Ok(())
}
