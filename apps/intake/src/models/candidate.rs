use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub experience: String,
    pub company: String,
    pub vendor_id: Option<i64>,
    pub cv_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Candidate joined with its vendor's display name, as listed on dashboards.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateListing {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub experience: String,
    pub company: String,
    pub vendor_name: Option<String>,
    pub cv_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateListing {
    pub fn has_cv(&self) -> bool {
        self.cv_path.is_some()
    }
}

/// The free-text columns a wizard step may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Name,
    Email,
    Experience,
    Company,
}

impl CandidateField {
    /// Column name; only ever interpolated from this closed set.
    pub fn column(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Experience => "experience",
            CandidateField::Company => "company",
        }
    }
}
