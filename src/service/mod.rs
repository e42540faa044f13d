//! Upload, retrieve and delete flows.
//!
//! Each flow combines the metadata repository and the blob store in a fixed
//! order: blobs are written before rows are inserted, and rows are looked up
//! before blobs are touched. There is no rollback across the two stores; a
//! failure after the blob write leaves an orphaned blob, which is logged.

mod files;
mod papers;

pub use files::FileService;
pub use papers::{PaperForm, PaperService, PAPER_CONTENT_TYPE};

use bytes::Bytes;
use thiserror::Error;

use crate::blob_store::BlobHandle;

/// Failure of a flow, tagged by the layer that failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed request input. Nothing was written.
    #[error("{0}")]
    ClientInput(String),
    #[error("{0}")]
    NotFound(String),
    /// Disk or database failure.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn client_input(message: impl Into<String>) -> Self {
        ServiceError::ClientInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ServiceError::Storage(message.into())
    }
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// A blob ready to be streamed back to the client.
#[derive(Debug)]
pub struct Download {
    /// Name offered to the client in Content-Disposition
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub blob: BlobHandle,
}
