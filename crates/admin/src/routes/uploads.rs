//! Image upload route handler.
//!
//! Accepts a multipart form with a single `file` field, pushes the bytes to
//! the external image host, and returns the hosted URL for the editor to
//! store on whatever record it is editing.

use axum::{Json, extract::Multipart, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::services::images::{ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES};
use crate::state::AppState;

/// Upload result payload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload one image and return its public URL.
#[instrument(skip(state, _admin, multipart))]
pub async fn upload(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AdminError::BadRequest(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| AdminError::BadRequest("no file in request".to_string()))?;

    if field.name() != Some("file") {
        return Err(AdminError::BadRequest(
            "expected a single 'file' field".to_string(),
        ));
    }

    let content_type = field
        .content_type()
        .map(ToString::to_string)
        .ok_or_else(|| AdminError::BadRequest("file has no content type".to_string()))?;
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(AdminError::BadRequest(format!(
            "unsupported content type {content_type}; expected one of {ALLOWED_CONTENT_TYPES:?}"
        )));
    }

    let file_name = field
        .file_name()
        .unwrap_or("upload")
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AdminError::BadRequest(format!("failed to read upload: {e}")))?;
    if bytes.is_empty() {
        return Err(AdminError::BadRequest("file is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AdminError::BadRequest(format!(
            "file exceeds the {} MiB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let hosted = state
        .images()
        .upload(&file_name, &content_type, bytes.to_vec())
        .await?;

    tracing::info!(url = %hosted.url, size = bytes.len(), "image uploaded");
    Ok(Json(UploadResponse { url: hosted.url }))
}
