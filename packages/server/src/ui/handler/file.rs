//! File endpoints: list, upload, download, delete.
//!
//! Every handler takes [`AuthorizedRoom`], so an unbound caller is rejected
//! with 401 before storage is touched.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::Response,
};
use futures_util::{StreamExt, TryStreamExt};

use crate::{
    infrastructure::dto::http::{
        DeleteFileForm, DownloadQuery, FileEntryDto, SuccessResponse, UploadResponse,
    },
    ui::state::AppState,
};

use super::{
    error::ApiError,
    extract::{ApiForm, ApiQuery},
    session::AuthorizedRoom,
};

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// List the room's files, newest first
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    AuthorizedRoom(room): AuthorizedRoom,
) -> Result<Json<Vec<FileEntryDto>>, ApiError> {
    let files = state.list_files_usecase.execute(&room).await?;

    // Domain Model から DTO への変換
    Ok(Json(files.into_iter().map(FileEntryDto::from).collect()))
}

/// Upload the `file` field of a multipart form
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AuthorizedRoom(room): AuthorizedRoom,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Multipart error in room {}: {}", room.code(), e);
        ApiError::new(e.status(), format!("Upload failed: {}", e.body_text()))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::bad_request("No file selected")),
        };

        // the body is streamed straight to storage, never buffered whole
        let content = field.map_err(std::io::Error::other).boxed();
        let entry = state
            .upload_file_usecase
            .execute(&room, &original_name, None, content)
            .await?;

        return Ok(Json(UploadResponse {
            success: true,
            name: entry.stored_name.as_str().to_string(),
        }));
    }

    Err(ApiError::bad_request("No file selected"))
}

/// Stream a file back as an attachment
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    AuthorizedRoom(room): AuthorizedRoom,
    ApiQuery(query): ApiQuery<DownloadQuery>,
) -> Result<Response, ApiError> {
    let download = state
        .download_file_usecase
        .execute(&room, &query.name)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&download.display_name),
        )
        .header(header::CONTENT_LENGTH, download.size)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(download.content))
        .map_err(|e| {
            tracing::error!("Failed to build download response: {}", e);
            ApiError::internal("Could not read file.")
        })
}

/// Delete a file by stored name or content identifier
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    AuthorizedRoom(room): AuthorizedRoom,
    ApiForm(form): ApiForm<DeleteFileForm>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .delete_file_usecase
        .execute(&room, &form.name)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// `attachment` disposition for a display name.
///
/// Display names only hold `[A-Za-z0-9._-]`, so plain quoting is safe.
fn content_disposition(display_name: &str) -> String {
    format!("attachment; filename=\"{}\"", display_name)
}
