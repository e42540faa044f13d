use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::service::Download;

const CONTENT_DESCRIPTION: HeaderName = HeaderName::from_static("content-description");
const CONTENT_TRANSFER_ENCODING: HeaderName = HeaderName::from_static("content-transfer-encoding");

/// Stream a blob back as an attachment.
pub(super) fn download_response(download: Download) -> Response {
    let Download {
        filename,
        content_type,
        size,
        blob,
    } = download;

    let body = Body::from_stream(ReaderStream::new(blob.into_reader()));
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();

    headers.insert(
        CONTENT_DESCRIPTION,
        HeaderValue::from_static("File Transfer"),
    );
    headers.insert(
        CONTENT_TRANSFER_ENCODING,
        HeaderValue::from_static("binary"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        content_type
            .parse()
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&filename));

    response
}

/// `attachment; filename="..."`, or a bare `attachment` when the name cannot
/// be expressed as a header value.
fn content_disposition(filename: &str) -> HeaderValue {
    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{escaped}\"")
        .parse()
        .unwrap_or(HeaderValue::from_static("attachment"))
}
