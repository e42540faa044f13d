use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::blob_store::{BlobStore, BlobStoreError};
use crate::storage::models::{NewPaper, PaperRecord};
use crate::storage::Database;

use super::{Download, ServiceError, Upload};

/// Paper files are always served as PDF, whatever their actual content.
pub const PAPER_CONTENT_TYPE: &str = "application/pdf";

/// Paper upload form as received from the client. Every field is required.
#[derive(Debug, Default, Clone)]
pub struct PaperForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub abstract_text: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    /// RFC 3339 date-time, e.g. `2024-05-01T10:00:00Z`
    pub publication_date: Option<String>,
    pub file: Option<Upload>,
}

struct ValidPaper {
    title: String,
    description: String,
    abstract_text: String,
    link: String,
    author: String,
    publication_date: DateTime<FixedOffset>,
    file: Upload,
}

impl PaperForm {
    /// Check every field, including the date format, before anything is written.
    fn validate(self) -> Result<ValidPaper, ServiceError> {
        let file = self
            .file
            .ok_or_else(|| ServiceError::client_input("file field is required"))?;
        let raw_date = required(self.publication_date, "publicationDate")?;
        let publication_date = DateTime::parse_from_rfc3339(&raw_date).map_err(|_| {
            ServiceError::client_input(
                "Invalid publicationDate format: expected an RFC 3339 date-time such as 2024-05-01T10:00:00Z",
            )
        })?;

        Ok(ValidPaper {
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            abstract_text: required(self.abstract_text, "abstract")?,
            link: required(self.link, "link")?,
            author: required(self.author, "author")?,
            publication_date,
            file,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value.ok_or_else(|| ServiceError::client_input(format!("{field} field is required")))
}

/// Generated blob name for a paper: a UUID plus the original extension.
fn stored_file_name(original: &str) -> String {
    let token = uuid::Uuid::new_v4();
    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{token}.{ext}"),
        _ => token.to_string(),
    }
}

/// Upload, listing and download of papers. Papers cannot be updated or deleted.
pub struct PaperService {
    db: Database,
    blobs: Arc<dyn BlobStore>,
}

impl PaperService {
    pub fn new(db: Database, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }

    /// Validate the form, write the paper's blob, then insert its record.
    pub async fn upload(&self, form: PaperForm) -> Result<PaperRecord, ServiceError> {
        let paper = form.validate()?;
        let stored_file_name = stored_file_name(&paper.file.filename);

        self.blobs
            .put(&stored_file_name, paper.file.data)
            .await
            .map_err(|e| {
                tracing::error!(stored_file_name = %stored_file_name, error = %e, "Failed to write blob");
                ServiceError::storage("Failed to save file")
            })?;

        let new_paper = NewPaper {
            title: paper.title,
            description: paper.description,
            abstract_text: paper.abstract_text,
            link: paper.link,
            author: paper.author,
            stored_file_name: stored_file_name.clone(),
            publication_date: paper.publication_date,
        };
        let record = self.db.insert_paper(new_paper).map_err(|e| {
            tracing::warn!(stored_file_name = %stored_file_name, error = %e, "Blob orphaned: paper insert failed");
            ServiceError::storage("Failed to save paper to database")
        })?;

        tracing::debug!(paper_id = record.id, stored_file_name = %record.stored_file_name, "Uploaded paper");
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<PaperRecord>, ServiceError> {
        self.db.list_papers().map_err(|e| {
            tracing::error!(error = %e, "Failed to list papers");
            ServiceError::storage("Failed to get papers from database")
        })
    }

    /// Open a paper's blob for download. `id` is taken verbatim from the
    /// request path; anything that is not a paper id is simply not found.
    pub async fn download(&self, id: &str) -> Result<Download, ServiceError> {
        let id: u64 = id
            .parse()
            .map_err(|_| ServiceError::not_found("Paper not found"))?;

        let paper = self
            .db
            .find_paper(id)
            .map_err(|e| {
                tracing::error!(paper_id = id, error = %e, "Failed to look up paper");
                ServiceError::storage("Failed to look up paper")
            })?
            .ok_or_else(|| ServiceError::not_found("Paper not found"))?;

        let blob = match self.blobs.open(&paper.stored_file_name).await {
            Ok(blob) => blob,
            Err(BlobStoreError::NotFound(_)) => {
                tracing::warn!(paper_id = id, stored_file_name = %paper.stored_file_name, "Paper has no blob");
                return Err(ServiceError::not_found("File not found"));
            }
            Err(e) => {
                tracing::error!(paper_id = id, error = %e, "Failed to open blob");
                return Err(ServiceError::storage("Failed to open file"));
            }
        };

        Ok(Download {
            filename: paper.stored_file_name,
            content_type: PAPER_CONTENT_TYPE.to_string(),
            size: blob.size(),
            blob,
        })
    }
}
