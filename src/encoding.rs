//! BOM-tolerant UTF-8 decoding
//!
//! Extracted metadata and the on-disk JSON files are read as UTF-8 with an
//! optional leading byte order mark. Invalid UTF-8 is reported, never
//! repaired or re-decoded with another encoding.

use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decoding failure for extracted file contents
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DecodeError(#[from] std::str::Utf8Error);

/// Decode bytes as UTF-8, dropping a single leading BOM if present
pub fn decode_utf8_sig(bytes: &[u8]) -> Result<String, DecodeError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    Ok(std::str::from_utf8(body)?.to_owned())
}

/// Strip a leading BOM from already decoded text
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
