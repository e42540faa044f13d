//! paper-archive - file upload/download and paper metadata storage
//!
//! This crate provides:
//! - A blob store writing uploads to a local directory under generated names
//! - redb embedded database for file and paper metadata (ACID, crash-safe)
//! - Upload/retrieve/delete flows keeping blobs and records consistent
//! - REST API with multipart upload support

pub mod api;
pub mod blob_store;
pub mod config;
pub mod service;
pub mod storage;
#[cfg(test)]
pub mod testutil;

use std::sync::Arc;

use blob_store::BlobStore;
use config::Config;
use service::{FileService, PaperService};
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub files: FileService,
    pub papers: PaperService,
}

impl AppState {
    /// Wire the flows to a single metadata repository and blob store.
    pub fn new(config: Config, db: Database, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            config,
            files: FileService::new(db.clone(), Arc::clone(&blobs)),
            papers: PaperService::new(db.clone(), blobs),
            db,
        }
    }
}
