//! Auth Gate — plaintext credential check against the configured master secret
//! and the stored vendor secrets. No session is issued.

use crate::config::IntakeMode;
use crate::errors::AppError;
use crate::store::RecordStore;

/// Username of the master account (compared case-insensitively).
pub const MASTER_USERNAME: &str = "OWNER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Master,
    Vendor(i64),
}

impl Grant {
    /// Dashboard the operator is redirected to after logging in.
    pub fn dashboard_path(self, mode: IntakeMode) -> String {
        match (self, mode) {
            (Grant::Master, IntakeMode::Vendor) => "/dashboard/master".to_string(),
            (Grant::Master, IntakeMode::Simple) => "/dashboard".to_string(),
            (Grant::Vendor(id), _) => format!("/dashboard/vendor/{id}"),
        }
    }
}

/// Checks the master tier first, then (in vendor mode) the vendor tier.
/// In simple mode the username may be omitted entirely.
pub async fn authenticate(
    store: &dyn RecordStore,
    mode: IntakeMode,
    master_password: &str,
    username: Option<&str>,
    password: &str,
) -> Result<Grant, AppError> {
    let username = username.map(str::trim).filter(|u| !u.is_empty());

    let master_user = match username {
        Some(name) => name.eq_ignore_ascii_case(MASTER_USERNAME),
        None => mode == IntakeMode::Simple,
    };
    if master_user && password == master_password {
        return Ok(Grant::Master);
    }

    if mode == IntakeMode::Vendor {
        if let Some(name) = username {
            if let Some(vendor) = store.verify_vendor(name, password).await? {
                return Ok(Grant::Vendor(vendor.id));
            }
        }
    }

    Err(AppError::Forbidden)
}
