mod handle;
mod local;
mod sniff;

pub use handle::BlobHandle;
pub use local::LocalStore;
pub use sniff::{detect_content_type, SNIFF_LEN};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Blob not found: {0}")]
    NotFound(String),
    #[error("Invalid blob name: {0:?}")]
    InvalidName(String),
}

/// Byte storage addressed by a caller-supplied name.
/// Names are generated tokens -- the raw blobs are meaningless without the metadata DB.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `data` under `name`, replacing any existing blob of that name.
    async fn put(&self, name: &str, data: Bytes) -> Result<(), BlobStoreError>;
    /// Open a blob for reading. The handle is released when dropped.
    async fn open(&self, name: &str) -> Result<BlobHandle, BlobStoreError>;
    /// Remove a blob. Missing blobs yield `NotFound`.
    async fn delete(&self, name: &str) -> Result<(), BlobStoreError>;
    async fn exists(&self, name: &str) -> Result<bool, BlobStoreError>;
}
