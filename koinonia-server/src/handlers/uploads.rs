//! Multipart file uploads.

use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
};
use koinonia_model::ApiResponse;
use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::infra::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    pub url: String,
    pub size_bytes: u64,
}

pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload.bin").to_string();
        let stored_name =
            format!("{}-{}", Uuid::new_v4(), sanitize_filename(&original));
        let path = state.config.media.upload_dir.join(&stored_name);

        // Stream chunk by chunk; the body never sits in memory whole.
        let size_bytes = match stream_to_disk(&mut field, &path).await {
            Ok(written) => written,
            Err(err) => {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(err);
            }
        };
        if size_bytes == 0 {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(AppError::bad_request("Uploaded file is empty"));
        }

        info!(file = %stored_name, bytes = size_bytes, "file uploaded");
        return Ok(Json(ApiResponse::success(UploadedFile {
            url: format!("/files/{stored_name}"),
            filename: stored_name,
            size_bytes,
        })));
    }

    Err(AppError::bad_request("Missing 'file' part"))
}

async fn stream_to_disk(
    field: &mut Field<'_>,
    path: &Path,
) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path).await.map_err(|err| {
        AppError::internal(format!("failed to store upload: {err}"))
    })?;

    let mut written: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        written += chunk.len() as u64;
        file.write_all(&chunk).await.map_err(|err| {
            AppError::internal(format!("failed to store upload: {err}"))
        })?;
    }

    file.flush().await.map_err(|err| {
        AppError::internal(format!("failed to store upload: {err}"))
    })?;
    Ok(written)
}

/// Keep only characters safe in a path segment; never allow traversal.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "upload.bin".to_string()
    } else {
        trimmed.to_string()
    }
}
