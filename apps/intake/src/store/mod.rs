//! Record Store — the only component that reads or writes candidate and vendor rows.
//!
//! Handlers receive an `Arc<dyn RecordStore>` through `AppState`; the default
//! backend is `SqliteStore`, which takes a pooled connection per operation.

pub mod sqlite;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::{CandidateField, CandidateListing, CandidateRow};
use crate::models::vendor::VendorRow;

pub use sqlite::SqliteStore;

/// Which candidates a dashboard lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateFilter {
    All,
    Vendor(i64),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_vendors(&self) -> Result<Vec<VendorRow>, AppError>;

    /// Case-insensitive lookup by vendor name.
    async fn find_vendor(&self, name: &str) -> Result<Option<VendorRow>, AppError>;

    /// Case-insensitive name match plus exact secret match.
    async fn verify_vendor(&self, name: &str, secret: &str) -> Result<Option<VendorRow>, AppError>;

    /// Inserts a candidate with empty text fields and returns its id.
    async fn create_candidate(&self, vendor_id: Option<i64>) -> Result<i64, AppError>;

    /// Fails with `NotFound` when no candidate has this id.
    async fn update_field(
        &self,
        candidate_id: i64,
        field: CandidateField,
        value: &str,
    ) -> Result<(), AppError>;

    /// Fails with `NotFound` when no candidate has this id.
    async fn set_cv_path(&self, candidate_id: i64, path: &str) -> Result<(), AppError>;

    async fn get_candidate(&self, candidate_id: i64) -> Result<Option<CandidateRow>, AppError>;

    async fn list_candidates(
        &self,
        filter: CandidateFilter,
    ) -> Result<Vec<CandidateListing>, AppError>;

    /// Removes the candidate and returns the deleted row, if there was one.
    async fn delete_candidate(&self, candidate_id: i64) -> Result<Option<CandidateRow>, AppError>;
}
