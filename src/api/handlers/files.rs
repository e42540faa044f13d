use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use std::sync::Arc;

use super::downloads::download_response;
use super::read_upload;
use crate::api::response::{multipart_error, ApiError, AppMultipart, MessageBody};
use crate::storage::models::FileRecord;
use crate::AppState;

/// Route: POST /file (multipart field `file`)
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<FileRecord>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") && upload.is_none() {
            upload = Some(read_upload(field, state.config.max_upload_size).await?);
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("file field is required"))?;
    let file = state.files.upload(upload).await?;
    Ok(Json(file))
}

/// Route: POST /files (multipart field `files`, repeated)
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("files") {
            uploads.push(read_upload(field, state.config.max_upload_size).await?);
        }
    }

    let files = state.files.upload_many(uploads).await?;
    Ok(Json(files))
}

/// Route: GET /file/:identifier
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.files.download(&identifier).await?;
    Ok(download_response(download))
}

/// Route: DELETE /file/:identifier
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let file = state.files.delete(&identifier).await?;
    Ok(MessageBody::new(format!(
        "File {} deleted successfully",
        file.filename
    )))
}
