use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{BlobHandle, BlobStore, BlobStoreError};

/// Blob store backed by a directory on the local filesystem.
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Resolve a blob name to a path directly under the base directory.
    fn blob_path(&self, name: &str) -> Result<PathBuf, BlobStoreError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_path.join(name)),
            _ => Err(BlobStoreError::InvalidName(name.to_string())),
        }
    }
}

fn not_found(name: &str) -> impl FnOnce(std::io::Error) -> BlobStoreError + '_ {
    move |e| match e.kind() {
        ErrorKind::NotFound => BlobStoreError::NotFound(name.to_string()),
        _ => BlobStoreError::Io(e),
    }
}

#[async_trait]
impl BlobStore for LocalStore {
    async fn put(&self, name: &str, data: Bytes) -> Result<(), BlobStoreError> {
        let path = self.blob_path(name)?;
        tokio::fs::write(&path, &data).await?;
        Ok(())
    }

    async fn open(&self, name: &str) -> Result<BlobHandle, BlobStoreError> {
        let path = self.blob_path(name)?;
        let file = tokio::fs::File::open(&path).await.map_err(not_found(name))?;
        let size = file.metadata().await?.len();
        Ok(BlobHandle::new(file, size))
    }

    async fn delete(&self, name: &str) -> Result<(), BlobStoreError> {
        let path = self.blob_path(name)?;
        tokio::fs::remove_file(&path).await.map_err(not_found(name))
    }

    async fn exists(&self, name: &str) -> Result<bool, BlobStoreError> {
        let path = self.blob_path(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}
