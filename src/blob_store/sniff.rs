//! Content-type detection from a blob's leading bytes.

/// Number of leading bytes inspected when sniffing a content type.
pub const SNIFF_LEN: usize = 512;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Infer a MIME type from (at most) the first `SNIFF_LEN` bytes of content.
///
/// Known binary signatures win; otherwise UTF-8 text without binary control
/// bytes is `text/plain`, and everything else is `application/octet-stream`.
pub fn detect_content_type(data: &[u8]) -> String {
    let prefix = &data[..data.len().min(SNIFF_LEN)];

    if let Some(kind) = infer::get(prefix) {
        return kind.mime_type().to_string();
    }

    if looks_like_text(prefix) {
        TEXT_PLAIN.to_string()
    } else {
        OCTET_STREAM.to_string()
    }
}

fn looks_like_text(prefix: &[u8]) -> bool {
    if prefix.iter().any(|&b| is_binary_control(b)) {
        return false;
    }

    match std::str::from_utf8(prefix) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the sniff window is still text
        Err(e) => e.error_len().is_none(),
    }
}

fn is_binary_control(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_png_signature() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
        assert_eq!(detect_content_type(&png), "image/png");
    }

    #[test]
    fn test_detects_pdf_signature() {
        assert_eq!(detect_content_type(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3"), "application/pdf");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(detect_content_type(b"hello, world\r\n\tindented"), TEXT_PLAIN);
    }

    #[test]
    fn test_empty_is_text() {
        assert_eq!(detect_content_type(b""), TEXT_PLAIN);
    }

    #[test]
    fn test_binary_fallback() {
        assert_eq!(detect_content_type(&[0x00, 0x01, 0x02, 0xFF]), OCTET_STREAM);
    }

    #[test]
    fn test_utf8_split_at_window_edge() {
        // 511 ASCII bytes followed by the first byte of a two-byte sequence
        let mut data = vec![b'a'; SNIFF_LEN - 1];
        data.extend_from_slice("é".as_bytes());
        assert_eq!(detect_content_type(&data), TEXT_PLAIN);
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        assert_eq!(detect_content_type(&[b'a', 0xC3, b'b']), OCTET_STREAM);
    }
}
