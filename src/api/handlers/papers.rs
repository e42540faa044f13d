use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use std::sync::Arc;

use super::downloads::download_response;
use super::{read_text, read_upload};
use crate::api::response::{multipart_error, ApiError, AppMultipart};
use crate::service::PaperForm;
use crate::storage::models::PaperRecord;
use crate::AppState;

/// Route: POST /papers
pub async fn upload_paper(
    State(state): State<Arc<AppState>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<PaperRecord>, ApiError> {
    let mut form = PaperForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => form.title = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "abstract" => form.abstract_text = Some(read_text(field).await?),
            "link" => form.link = Some(read_text(field).await?),
            "author" => form.author = Some(read_text(field).await?),
            "publicationDate" => form.publication_date = Some(read_text(field).await?),
            "file" => {
                form.file = Some(read_upload(field, state.config.max_upload_size).await?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let paper = state.papers.upload(form).await?;
    Ok(Json(paper))
}

/// Route: GET /papers
pub async fn list_papers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PaperRecord>>, ApiError> {
    Ok(Json(state.papers.list()?))
}

/// Route: GET /papers/file/:id
pub async fn get_paper_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.papers.download(&id).await?;
    Ok(download_response(download))
}
