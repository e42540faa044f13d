use std::io::Cursor;
use std::pin::Pin;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::sniff::{detect_content_type, SNIFF_LEN};
use super::BlobStoreError;

/// An open blob. Owns the underlying reader, so the file handle is closed on
/// every exit path once the handle (or the reader produced from it) is dropped.
pub struct BlobHandle {
    size: u64,
    /// Bytes already consumed by content sniffing, replayed ahead of `reader`.
    prefix: Option<Bytes>,
    reader: Pin<Box<dyn AsyncRead + Send>>,
}

impl BlobHandle {
    pub fn new<R>(reader: R, size: u64) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            size,
            prefix: None,
            reader: Box::pin(reader),
        }
    }

    /// Size of the blob in bytes, as reported when it was opened.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Infer a MIME type from the first `SNIFF_LEN` bytes of the blob.
    ///
    /// The inspected bytes are not lost: `into_reader` yields them again
    /// before the rest of the content.
    pub async fn sniff_content_type(&mut self) -> Result<String, BlobStoreError> {
        if let Some(ref prefix) = self.prefix {
            return Ok(detect_content_type(prefix));
        }

        let mut buf = vec![0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < SNIFF_LEN {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);

        let content_type = detect_content_type(&buf);
        self.prefix = Some(Bytes::from(buf));
        Ok(content_type)
    }

    /// Consume the handle, returning a reader over the full blob content.
    pub fn into_reader(self) -> impl AsyncRead + Send + Unpin + 'static {
        Cursor::new(self.prefix.unwrap_or_default()).chain(self.reader)
    }

    /// Read the whole blob into memory.
    pub async fn read_to_end(self) -> Result<Vec<u8>, BlobStoreError> {
        let mut data = Vec::with_capacity(self.size as usize);
        self.into_reader().read_to_end(&mut data).await?;
        Ok(data)
    }
}

impl std::fmt::Debug for BlobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobHandle")
            .field("size", &self.size)
            .field("sniffed", &self.prefix.as_ref().map(|p| p.len()))
            .finish()
    }
}
