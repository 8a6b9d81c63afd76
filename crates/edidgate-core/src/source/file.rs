use std::fs;
use std::path::Path;

use super::SourceError;
use crate::envelope::layout;

/// Read a descriptor from `path`.
///
/// Files starting with the EDID header are returned verbatim. Anything else
/// that consists solely of hex digits and whitespace is decoded as a hex
/// dump; remaining files are returned verbatim and left for the envelope
/// check to judge.
///
/// # Errors
/// `SourceError::Io` when the file cannot be read, `SourceError::Hex` when a
/// hex dump has an odd number of digits.
pub fn read_edid_file(path: &Path) -> Result<Vec<u8>, SourceError> {
    let raw = fs::read(path)?;
    if raw.starts_with(layout::EDID_HEADER) || !looks_like_hex_dump(&raw) {
        return Ok(raw);
    }
    decode_hex_dump(&raw)
}

/// Decode a whitespace-separated hex dump such as `00 ff ff ff ...`.
///
/// # Examples
/// ```
/// use edidgate_core::decode_hex_dump;
///
/// let bytes = decode_hex_dump(b"00 ff\nff 00").unwrap();
/// assert_eq!(bytes, vec![0x00, 0xff, 0xff, 0x00]);
/// ```
///
/// # Errors
/// `SourceError::Hex` when the digits do not form whole bytes.
pub fn decode_hex_dump(text: &[u8]) -> Result<Vec<u8>, SourceError> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(hex::decode(digits)?)
}

fn looks_like_hex_dump(raw: &[u8]) -> bool {
    raw.iter().any(u8::is_ascii_hexdigit)
        && raw
            .iter()
            .all(|b| b.is_ascii_hexdigit() || b.is_ascii_whitespace())
}
