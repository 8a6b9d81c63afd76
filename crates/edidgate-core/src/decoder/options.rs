/// Switches that shape how a parse engine decodes a descriptor.
///
/// The dispatcher restores `DecoderOptions::default()` before every call;
/// callers cannot override them through `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Run conformity checks and report failures.
    pub check: bool,
    /// Check the preferred timings.
    pub preferred_timings: bool,
    /// Check the native resolution.
    pub native_resolution: bool,
    /// Skip SHA hash reporting.
    pub skip_sha: bool,
    /// Emit text as UTF-8.
    pub utf8: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            check: true,
            preferred_timings: true,
            native_resolution: true,
            skip_sha: false,
            utf8: true,
        }
    }
}
