use std::io::ErrorKind;
use std::path::Path;

use axum::{
    extract::{Multipart, Path as UrlPath, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::storage::original_filename;

pub const UPLOAD_OK: &str = "CV uploaded successfully!";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

/// POST /upload
/// Multipart fields: `file` (binary) and `candidate_id` (integer).
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut candidate_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((filename, data));
            }
            Some("candidate_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read candidate_id: {e}")))?;
                let id = text.trim().parse::<i64>().map_err(|_| {
                    AppError::Validation(format!("candidate_id must be an integer, got '{text}'"))
                })?;
                candidate_id = Some(id);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let candidate_id = candidate_id
        .ok_or_else(|| AppError::Validation("Missing 'candidate_id' field".to_string()))?;

    let path = state.resumes.save(&filename, &data).await?;
    let path_str = path.to_string_lossy();

    if let Err(err) = state.store.set_cv_path(candidate_id, &path_str).await {
        if let Err(cleanup) = state.resumes.remove(&path).await {
            warn!("Failed to remove orphaned upload {path_str}: {cleanup}");
        }
        return Err(err);
    }

    info!(
        candidate_id,
        bytes = data.len(),
        "Stored CV at {path_str}"
    );

    Ok(Json(UploadResponse {
        message: UPLOAD_OK.to_string(),
    }))
}

/// GET /download/:candidate_id
pub async fn handle_download(
    State(state): State<AppState>,
    UrlPath(candidate_id): UrlPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound("CV not found".to_string());

    let candidate = state
        .store
        .get_candidate(candidate_id)
        .await?
        .ok_or_else(not_found)?;
    let cv_path = candidate.cv_path.ok_or_else(not_found)?;
    let path = Path::new(&cv_path);

    let data = match state.resumes.read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(candidate_id, "CV recorded at {cv_path} is missing on disk");
            return Err(not_found());
        }
        Err(e) => return Err(e.into()),
    };

    let filename = original_filename(path);
    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}
