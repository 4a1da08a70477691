use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::candidate::{CandidateField, CandidateListing, CandidateRow};
use crate::models::vendor::VendorRow;
use crate::store::{CandidateFilter, RecordStore};

const LISTING_SELECT: &str = r#"
    SELECT c.id, c.name, c.email, c.experience, c.company,
           v.name AS vendor_name, c.cv_path, c.created_at
    FROM candidates c
    LEFT JOIN vendors v ON c.vendor_id = v.id
"#;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_vendors(&self) -> Result<Vec<VendorRow>, AppError> {
        Ok(
            sqlx::query_as::<_, VendorRow>("SELECT id, name FROM vendors ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn find_vendor(&self, name: &str) -> Result<Option<VendorRow>, AppError> {
        Ok(sqlx::query_as::<_, VendorRow>(
            "SELECT id, name FROM vendors WHERE UPPER(name) = UPPER(?)",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn verify_vendor(&self, name: &str, secret: &str) -> Result<Option<VendorRow>, AppError> {
        Ok(sqlx::query_as::<_, VendorRow>(
            "SELECT id, name FROM vendors WHERE UPPER(name) = UPPER(?) AND admin_password = ?",
        )
        .bind(name.trim())
        .bind(secret)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_candidate(&self, vendor_id: Option<i64>) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO candidates (vendor_id, name, email, experience, company, created_at)
            VALUES (?, '', '', '', '', ?)
            "#,
        )
        .bind(vendor_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(candidate_id = id, ?vendor_id, "Created candidate record");
        Ok(id)
    }

    async fn update_field(
        &self,
        candidate_id: i64,
        field: CandidateField,
        value: &str,
    ) -> Result<(), AppError> {
        let sql = format!("UPDATE candidates SET {} = ? WHERE id = ?", field.column());
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Candidate {candidate_id} not found"
            )));
        }
        debug!(candidate_id, field = field.column(), "Updated candidate field");
        Ok(())
    }

    async fn set_cv_path(&self, candidate_id: i64, path: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE candidates SET cv_path = ? WHERE id = ?")
            .bind(path)
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Candidate {candidate_id} not found"
            )));
        }
        Ok(())
    }

    async fn get_candidate(&self, candidate_id: i64) -> Result<Option<CandidateRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = ?")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_candidates(
        &self,
        filter: CandidateFilter,
    ) -> Result<Vec<CandidateListing>, AppError> {
        let rows = match filter {
            CandidateFilter::All => {
                let sql = format!("{LISTING_SELECT} ORDER BY c.id");
                sqlx::query_as::<_, CandidateListing>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
            CandidateFilter::Vendor(vendor_id) => {
                let sql = format!("{LISTING_SELECT} WHERE c.vendor_id = ? ORDER BY c.id");
                sqlx::query_as::<_, CandidateListing>(&sql)
                    .bind(vendor_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn delete_candidate(&self, candidate_id: i64) -> Result<Option<CandidateRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CandidateRow>("DELETE FROM candidates WHERE id = ? RETURNING *")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
