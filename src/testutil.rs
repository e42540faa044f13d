//! Shared test helpers for paper-archive unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use bytes::Bytes;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::blob_store::{BlobHandle, BlobStore, BlobStoreError, LocalStore};
use crate::config::{Config, ServerConfig, StorageConfig};
use crate::storage::Database;
use crate::AppState;

/// Directory the test blob store writes into.
pub fn upload_dir(temp_dir: &tempfile::TempDir) -> PathBuf {
    temp_dir.path().join("uploads")
}

/// Number of blobs currently in the test upload directory.
pub fn blob_count(temp_dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(upload_dir(temp_dir))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

/// Create a test AppState with a temporary database and local blob store.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let store = LocalStore::new(upload_dir(temp_dir)).expect("Failed to create test blob store");
    test_state_with_store(temp_dir, Arc::new(store))
}

/// Create a test AppState around a caller-supplied blob store.
pub fn test_state_with_store(
    temp_dir: &tempfile::TempDir,
    blobs: Arc<dyn BlobStore>,
) -> Arc<AppState> {
    let data_dir = temp_dir.path().join("data");

    let config = Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
        },
        storage: StorageConfig {
            data_dir: data_dir.to_string_lossy().to_string(),
            upload_dir: upload_dir(temp_dir).to_string_lossy().to_string(),
        },
        max_upload_size: 1024 * 1024, // 1MB for tests
    };

    let db = Database::open(&data_dir).expect("Failed to open test database");
    Arc::new(AppState::new(config, db, blobs))
}

/// Local blob store whose Nth write (1-based) fails.
pub struct FailingStore {
    inner: LocalStore,
    fail_on_put: usize,
    puts: AtomicUsize,
}

impl FailingStore {
    pub fn new(temp_dir: &tempfile::TempDir, fail_on_put: usize) -> Self {
        Self {
            inner: LocalStore::new(upload_dir(temp_dir)).expect("Failed to create test blob store"),
            fail_on_put,
            puts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BlobStore for FailingStore {
    async fn put(&self, name: &str, data: Bytes) -> Result<(), BlobStoreError> {
        let attempt = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on_put {
            return Err(BlobStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }
        self.inner.put(name, data).await
    }

    async fn open(&self, name: &str) -> Result<BlobHandle, BlobStoreError> {
        self.inner.open(name).await
    }

    async fn delete(&self, name: &str) -> Result<(), BlobStoreError> {
        self.inner.delete(name).await
    }

    async fn exists(&self, name: &str) -> Result<bool, BlobStoreError> {
        self.inner.exists(name).await
    }
}

const BOUNDARY: &str = "paper-archive-test-boundary";

/// Builder for multipart/form-data request bodies.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .expect("Failed to build multipart request")
    }
}

/// Build a body-less request.
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Run a request through the full router.
pub async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    crate::api::create_router(Arc::clone(state))
        .oneshot(request)
        .await
        .expect("Router is infallible")
}

pub async fn body_bytes(response: Response) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Response body is not JSON")
}
