use super::error::EnvelopeError;
use super::layout;

/// Bounds-checked view of a staged buffer split into fixed-size pages.
pub struct EnvelopeReader<'a> {
    buffer: &'a [u8],
    page_size: usize,
}

impl<'a> EnvelopeReader<'a> {
    pub fn new(buffer: &'a [u8], page_size: usize) -> Self {
        Self { buffer, page_size }
    }

    /// Check a caller-declared length against `[page_size, capacity]`.
    pub fn require_len(&self, declared: usize) -> Result<(), EnvelopeError> {
        if declared < self.page_size || declared > self.buffer.len() {
            return Err(EnvelopeError::InvalidSize {
                len: declared,
                min: self.page_size,
                max: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn read_signature(&self) -> Result<&'a [u8], EnvelopeError> {
        self.buffer
            .get(layout::HEADER_RANGE)
            .ok_or(EnvelopeError::NoHeader)
    }

    /// Bytes of page `index`, or `None` if the page is not fully present.
    pub fn page(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(self.page_size)?;
        let end = start.checked_add(self.page_size)?;
        self.buffer.get(start..end)
    }
}
