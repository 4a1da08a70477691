use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::VendorSeed;

/// Creates the SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates the vendor and candidate tables if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vendors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            admin_password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            experience TEXT NOT NULL DEFAULT '',
            company TEXT NOT NULL DEFAULT '',
            vendor_id INTEGER REFERENCES vendors(id),
            cv_path TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_candidates_vendor_id ON candidates(vendor_id)")
        .execute(pool)
        .await?;

    info!("Database schema ready");
    Ok(())
}

/// Inserts the configured vendors. Existing rows (by name) are left untouched,
/// so restarts neither duplicate nor overwrite vendors.
pub async fn seed_vendors(pool: &SqlitePool, seeds: &[VendorSeed]) -> Result<()> {
    for seed in seeds {
        let result =
            sqlx::query("INSERT OR IGNORE INTO vendors (name, admin_password) VALUES (?, ?)")
                .bind(&seed.name)
                .bind(&seed.admin_password)
                .execute(pool)
                .await?;

        if result.rows_affected() > 0 {
            info!("Seeded vendor {}", seed.name);
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let pool = test_pool::seeded().await;
        let seeds = vec![VendorSeed {
            name: "XX".to_string(),
            admin_password: "changed".to_string(),
        }];
        seed_vendors(&pool, &seeds).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);

        let secret: String = sqlx::query_scalar("SELECT admin_password FROM vendors WHERE name = 'XX'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(secret, "xx123");
    }

    #[tokio::test]
    async fn test_default_vendors_get_ids_in_seed_order() {
        let pool = test_pool::seeded().await;
        let ids: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM vendors ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(ids, vec![(1, "XX".to_string()), (2, "YY".to_string())]);
    }
}
