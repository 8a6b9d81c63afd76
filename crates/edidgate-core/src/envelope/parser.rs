use super::error::EnvelopeError;
use super::layout;
use super::reader::EnvelopeReader;

/// Size metadata of a buffer that passed the envelope checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// Declared length, copied verbatim.
    pub size: usize,
    /// Whole pages in `size`; a partial trailing page is not counted.
    pub num_blocks: usize,
}

/// Validate `declared` bytes of `staging` as a descriptor envelope.
///
/// Checks run in a fixed order and the first failure wins: length lower
/// bound, length upper bound (the staging capacity), then the 8-byte header.
/// The header is read from the start of `staging` regardless of `declared`.
///
/// # Examples
/// ```
/// use edidgate_core::envelope::{layout, validate_envelope};
///
/// let mut staging = vec![0u8; 1024];
/// staging[..8].copy_from_slice(layout::EDID_HEADER);
/// let envelope = validate_envelope(&staging, 128, 3 * 128 + 1).unwrap();
/// assert_eq!(envelope.num_blocks, 3);
/// ```
///
/// # Errors
/// `EnvelopeError::InvalidSize` when `declared` is outside
/// `[page_size, staging.len()]`, `EnvelopeError::NoHeader` when the header
/// signature does not match.
pub fn validate_envelope(
    staging: &[u8],
    page_size: usize,
    declared: usize,
) -> Result<Envelope, EnvelopeError> {
    let reader = EnvelopeReader::new(staging, page_size);
    reader.require_len(declared)?;

    let signature = reader.read_signature()?;
    if signature != layout::EDID_HEADER {
        return Err(EnvelopeError::NoHeader);
    }

    Ok(Envelope {
        size: declared,
        num_blocks: declared / page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::validate_envelope;
    use crate::envelope::{EnvelopeError, layout};

    fn staged(capacity: usize) -> Vec<u8> {
        let mut staging = vec![0u8; capacity];
        staging[layout::HEADER_RANGE].copy_from_slice(layout::EDID_HEADER);
        staging
    }

    #[test]
    fn accepts_single_page() {
        let staging = staged(1024);
        let envelope = validate_envelope(&staging, 128, 128).unwrap();
        assert_eq!(envelope.size, 128);
        assert_eq!(envelope.num_blocks, 1);
    }

    #[test]
    fn truncates_partial_trailing_page() {
        let staging = staged(1024);
        let envelope = validate_envelope(&staging, 128, 128 * 3 + 1).unwrap();
        assert_eq!(envelope.size, 385);
        assert_eq!(envelope.num_blocks, 3);
    }

    #[test]
    fn rejects_short_length() {
        let staging = staged(1024);
        let err = validate_envelope(&staging, 128, 64).unwrap_err();
        assert_eq!(
            err,
            EnvelopeError::InvalidSize {
                len: 64,
                min: 128,
                max: 1024
            }
        );
    }

    #[test]
    fn rejects_length_over_capacity_before_header() {
        let staging = vec![0xAAu8; 1024];
        let err = validate_envelope(&staging, 128, 2048).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidSize { len: 2048, .. }));
    }

    #[test]
    fn accepts_exact_capacity() {
        let staging = staged(1024);
        let envelope = validate_envelope(&staging, 128, 1024).unwrap();
        assert_eq!(envelope.num_blocks, 8);
    }

    #[test]
    fn rejects_wrong_first_byte() {
        let mut staging = staged(1024);
        staging[0] = 0x01;
        let err = validate_envelope(&staging, 128, 128).unwrap_err();
        assert_eq!(err, EnvelopeError::NoHeader);
        assert!(err.to_string().contains("no EDID header"));
    }

    #[test]
    fn rejects_any_single_header_byte_flip() {
        for index in layout::HEADER_RANGE {
            let mut staging = staged(256);
            staging[index] ^= 0x01;
            let err = validate_envelope(&staging, 128, 256).unwrap_err();
            assert_eq!(err, EnvelopeError::NoHeader, "byte {index}");
        }
    }
}
