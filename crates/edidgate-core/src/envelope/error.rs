use thiserror::Error;

/// Reasons a staged buffer is refused before it reaches a parse engine.
///
/// # Examples
/// ```
/// use edidgate_core::EnvelopeError;
///
/// let err = EnvelopeError::InvalidSize { len: 64, min: 128, max: 32768 };
/// assert!(err.to_string().contains("invalid EDID size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("invalid EDID size: {len} bytes (expected {min}..={max})")]
    InvalidSize { len: usize, min: usize, max: usize },
    #[error("no EDID header found")]
    NoHeader,
}

impl EnvelopeError {
    /// Stable identifier used in reports.
    pub fn id(&self) -> &'static str {
        match self {
            EnvelopeError::InvalidSize { .. } => "invalid-size",
            EnvelopeError::NoHeader => "no-header",
        }
    }
}
