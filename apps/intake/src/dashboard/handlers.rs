use std::io::ErrorKind;
use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    response::{Html, Response},
};
use tracing::{info, warn};

use crate::dashboard::render::{render_admin, render_master, render_vendor};
use crate::errors::AppError;
use crate::routes::found;
use crate::state::AppState;
use crate::store::CandidateFilter;

/// GET /dashboard/master
pub async fn handle_master_dashboard(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let rows = state.store.list_candidates(CandidateFilter::All).await?;
    Ok(Html(render_master(&rows)))
}

/// GET /dashboard/vendor/:vendor_id
pub async fn handle_vendor_dashboard(
    State(state): State<AppState>,
    UrlPath(vendor_id): UrlPath<i64>,
) -> Result<Html<String>, AppError> {
    let vendor_name = state
        .store
        .list_vendors()
        .await?
        .into_iter()
        .find(|v| v.id == vendor_id)
        .map(|v| v.name);
    let rows = state
        .store
        .list_candidates(CandidateFilter::Vendor(vendor_id))
        .await?;
    Ok(Html(render_vendor(vendor_name.as_deref(), &rows)))
}

/// GET /dashboard
pub async fn handle_admin_dashboard(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let rows = state.store.list_candidates(CandidateFilter::All).await?;
    Ok(Html(render_admin(&rows)))
}

/// GET /delete/:candidate_id
/// Removes the record and its stored CV, then returns to the admin dashboard.
pub async fn handle_delete(
    State(state): State<AppState>,
    UrlPath(candidate_id): UrlPath<i64>,
) -> Result<Response, AppError> {
    let removed = state
        .store
        .delete_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    if let Some(cv_path) = removed.cv_path {
        // The row is already gone; a leftover file is logged, not surfaced.
        match state.resumes.remove(Path::new(&cv_path)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(candidate_id, "CV at {cv_path} was already gone");
            }
            Err(e) => warn!(candidate_id, "Failed to remove CV at {cv_path}: {e}"),
        }
    }

    info!(candidate_id, "Deleted candidate");
    Ok(found("/dashboard"))
}
