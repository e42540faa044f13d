mod downloads;
mod files;
mod health;
mod papers;

use axum::extract::multipart::Field;

use crate::api::response::{multipart_error, ApiError};
use crate::service::Upload;

pub use files::{delete_file, get_file, upload_file, upload_files};
pub use health::health;
pub use papers::{get_paper_file, list_papers, upload_paper};

/// Read a multipart file part into an `Upload`. Parts without a filename are
/// rejected: the field must carry a file, not a plain value.
async fn read_upload(field: Field<'_>, max_upload_size: u64) -> Result<Upload, ApiError> {
    let field_name = field.name().unwrap_or("").to_string();
    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::bad_request(format!("{field_name} field must be a file")))?;

    let data = field.bytes().await.map_err(multipart_error)?;

    if data.len() as u64 > max_upload_size {
        return Err(ApiError::payload_too_large(format!(
            "File exceeds maximum upload size of {max_upload_size} bytes"
        )));
    }

    Ok(Upload { filename, data })
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(multipart_error)
}
