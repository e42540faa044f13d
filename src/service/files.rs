use std::sync::Arc;

use crate::blob_store::{BlobStore, BlobStoreError};
use crate::storage::models::{FileRecord, NewFile};
use crate::storage::Database;

use super::{Download, ServiceError, Upload};

/// Upload, download and delete of generic files.
/// Blobs are named by the record's identifier.
pub struct FileService {
    db: Database,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(db: Database, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }

    /// Store one file: write the blob, then insert its record.
    pub async fn upload(&self, upload: Upload) -> Result<FileRecord, ServiceError> {
        let new_file = NewFile::generate(upload.filename);

        self.blobs
            .put(&new_file.identifier, upload.data)
            .await
            .map_err(|e| {
                tracing::error!(identifier = %new_file.identifier, error = %e, "Failed to write blob");
                ServiceError::storage("Failed to save file")
            })?;

        let identifier = new_file.identifier.clone();
        let file = self.db.insert_file(new_file).map_err(|e| {
            tracing::warn!(identifier = %identifier, error = %e, "Blob orphaned: metadata insert failed");
            ServiceError::storage("Failed to save file metadata")
        })?;

        tracing::debug!(file_id = file.id, identifier = %file.identifier, "Uploaded file");
        Ok(file)
    }

    /// Store several files: every blob is written first, then all records are
    /// inserted together. The first failed write aborts the request; blobs
    /// already written for earlier files are left in place.
    pub async fn upload_many(&self, uploads: Vec<Upload>) -> Result<Vec<FileRecord>, ServiceError> {
        if uploads.is_empty() {
            return Err(ServiceError::client_input("files field is required"));
        }

        let mut new_files = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let new_file = NewFile::generate(upload.filename);
            if let Err(e) = self.blobs.put(&new_file.identifier, upload.data).await {
                tracing::error!(identifier = %new_file.identifier, error = %e, "Failed to write blob");
                if !new_files.is_empty() {
                    tracing::warn!(
                        orphaned = new_files.len(),
                        "Blobs orphaned: batch upload aborted"
                    );
                }
                return Err(ServiceError::storage("Failed to save file"));
            }
            new_files.push(new_file);
        }

        let count = new_files.len();
        let files = self.db.insert_files(new_files).map_err(|e| {
            tracing::warn!(orphaned = count, error = %e, "Blobs orphaned: metadata insert failed");
            ServiceError::storage("Failed to save file information")
        })?;

        tracing::debug!(count = files.len(), "Uploaded files");
        Ok(files)
    }

    /// Open a file's blob for download, sniffing its content type.
    pub async fn download(&self, identifier: &str) -> Result<Download, ServiceError> {
        let file = self.find(identifier)?;

        let mut blob = match self.blobs.open(&file.identifier).await {
            Ok(blob) => blob,
            Err(BlobStoreError::NotFound(_)) => {
                return Err(self.missing_blob(&file, "Failed to open file"));
            }
            Err(e) => {
                tracing::error!(identifier = %file.identifier, error = %e, "Failed to open blob");
                return Err(ServiceError::storage("Failed to open file"));
            }
        };

        let content_type = blob.sniff_content_type().await.map_err(|e| {
            tracing::error!(identifier = %file.identifier, error = %e, "Failed to read blob");
            ServiceError::storage("Failed to read file")
        })?;

        Ok(Download {
            filename: file.filename,
            content_type,
            size: blob.size(),
            blob,
        })
    }

    /// Remove a file's blob, then its record. A failed blob removal leaves the
    /// record untouched.
    pub async fn delete(&self, identifier: &str) -> Result<FileRecord, ServiceError> {
        let file = self.find(identifier)?;

        match self.blobs.delete(&file.identifier).await {
            Ok(()) => {}
            Err(BlobStoreError::NotFound(_)) => {
                return Err(
                    self.missing_blob(&file, "Failed to delete file from upload folder")
                );
            }
            Err(e) => {
                tracing::error!(identifier = %file.identifier, error = %e, "Failed to delete blob");
                return Err(ServiceError::storage(
                    "Failed to delete file from upload folder",
                ));
            }
        }

        match self.db.delete_file(&file) {
            Ok(true) => {
                tracing::debug!(file_id = file.id, identifier = %file.identifier, "Deleted file");
                Ok(file)
            }
            Ok(false) => Err(ServiceError::not_found("File not found")),
            Err(e) => {
                tracing::error!(identifier = %file.identifier, error = %e, "Record orphaned: blob removed but delete failed");
                Err(ServiceError::storage("Failed to delete file from database"))
            }
        }
    }

    fn find(&self, identifier: &str) -> Result<FileRecord, ServiceError> {
        self.db
            .find_file_by_identifier(identifier)
            .map_err(|e| {
                tracing::error!(identifier = %identifier, error = %e, "Failed to look up file");
                ServiceError::storage("Failed to look up file")
            })?
            .ok_or_else(|| ServiceError::not_found("File not found"))
    }

    /// Classify a blob that vanished under an existing record. If the record is
    /// gone too, a concurrent delete won and the file simply no longer exists.
    fn missing_blob(&self, file: &FileRecord, message: &str) -> ServiceError {
        match self.find(&file.identifier) {
            Ok(_) => {
                tracing::error!(identifier = %file.identifier, "Record has no blob");
                ServiceError::storage(message)
            }
            Err(e) => e,
        }
    }
}
