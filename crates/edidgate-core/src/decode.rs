//! File-to-report pipeline: source -> staging -> dispatcher -> report.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::decoder::{ChecksumEngine, DecoderState, MessageKind, ParseEngine};
use crate::diagnostics::DiagnosticSink;
use crate::dispatch::{Dispatcher, STATUS_REJECTED};
use crate::envelope::EnvelopeError;
use crate::source::{SourceError, read_edid_file};
use crate::{BlockSummary, Rejection, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Load a descriptor file and run it through a fresh dispatcher.
///
/// `generated_at` is the file's modification time when available.
///
/// # Errors
/// `DecodeError` when the file cannot be read or decoded as a hex dump.
/// Envelope rejections are not errors; they are recorded in the report.
pub fn decode_edid_file(path: &Path) -> Result<Report, DecodeError> {
    let meta = fs::metadata(path)?;
    let bytes = read_edid_file(path)?;

    let mut dispatcher: Dispatcher<ChecksumEngine> = Dispatcher::new(ChecksumEngine::new());
    let mut report = decode_with(&mut dispatcher, &path.display().to_string(), &bytes);
    report.input.bytes = meta.len();
    if let Some(ts) = meta.modified().ok().and_then(format_system_time) {
        report.generated_at = ts;
    }
    Ok(report)
}

/// Run `bytes` through a fresh dispatcher with the reference engine.
///
/// # Examples
/// ```
/// use edidgate_core::decode_bytes;
///
/// let report = decode_bytes("inline", &[0u8; 64]);
/// assert_eq!(report.status, edidgate_core::STATUS_REJECTED);
/// assert_eq!(report.outcome, "rejected");
/// ```
pub fn decode_bytes(label: &str, bytes: &[u8]) -> Report {
    let mut dispatcher: Dispatcher<ChecksumEngine> = Dispatcher::new(ChecksumEngine::new());
    decode_with(&mut dispatcher, label, bytes)
}

/// Stage `bytes` into `dispatcher`, dispatch them, and summarise the result.
///
/// The staging area is cleared first so nothing from an earlier call sits
/// behind a shorter input. Inputs longer than the staging capacity are
/// truncated when staged but declared at full length, so the envelope check
/// rejects them.
pub fn decode_with<E, S, const PAGE: usize, const MAX_BLOCKS: usize>(
    dispatcher: &mut Dispatcher<E, S, PAGE, MAX_BLOCKS>,
    label: &str,
    bytes: &[u8],
) -> Report
where
    E: ParseEngine,
    S: DiagnosticSink,
{
    let staging = dispatcher.staging_mut();
    staging.clear();
    staging.fill(bytes);

    let mut report = make_stub_report(label, bytes.len() as u64);
    match dispatcher.try_parse(bytes.len()) {
        Ok(status) => {
            report.status = status;
            report.outcome = "parsed".to_string();
        }
        Err(err) => {
            tracing::warn!(input = label, "{err}");
            report.status = STATUS_REJECTED;
            report.outcome = "rejected".to_string();
            report.rejection = Some(rejection(&err));
        }
    }
    fill_from_state(&mut report, dispatcher.state());
    report
}

fn rejection(err: &EnvelopeError) -> Rejection {
    Rejection {
        id: err.id().to_string(),
        message: err.to_string(),
    }
}

fn fill_from_state(report: &mut Report, state: &DecoderState) {
    report.edid_size = state.edid_size as u64;
    report.num_blocks = state.num_blocks as u64;
    report.warnings = state.warnings as u64;
    report.failures = state.failures as u64;
    report.blocks = state
        .messages()
        .non_empty_blocks()
        .map(|block| BlockSummary {
            block: block as u32,
            warnings: state.messages_for(block, MessageKind::Warning).to_vec(),
            failures: state.messages_for(block, MessageKind::Failure).to_vec(),
        })
        .collect();
}

fn format_system_time(ts: SystemTime) -> Option<String> {
    OffsetDateTime::from(ts).format(&Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_bytes, decode_with, format_system_time};
    use crate::decoder::ChecksumEngine;
    use crate::diagnostics::CollectingSink;
    use crate::dispatch::{Dispatcher, STATUS_REJECTED};
    use crate::envelope::layout;

    fn base_block() -> Vec<u8> {
        let mut page = vec![0u8; layout::EDID_PAGE_SIZE];
        page[layout::HEADER_RANGE].copy_from_slice(layout::EDID_HEADER);
        let sum = page.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        page[layout::EDID_PAGE_SIZE - 1] = 0u8.wrapping_sub(sum);
        page
    }

    #[test]
    fn clean_block_reports_parsed() {
        let report = decode_bytes("inline", &base_block());
        assert_eq!(report.status, 0);
        assert_eq!(report.outcome, "parsed");
        assert_eq!(report.edid_size, 128);
        assert_eq!(report.num_blocks, 1);
        assert!(report.rejection.is_none());
        assert!(report.blocks.is_empty());
    }

    #[test]
    fn missing_header_reports_rejection() {
        let mut edid = base_block();
        edid[0] = 0x01;
        let report = decode_bytes("inline", &edid);
        assert_eq!(report.status, STATUS_REJECTED);
        let rejection = report.rejection.expect("rejection");
        assert_eq!(rejection.id, "no-header");
        assert_eq!(report.edid_size, 0);
    }

    #[test]
    fn oversized_input_is_rejected_not_truncated() {
        let mut edid = base_block();
        edid.resize(layout::EDID_PAGE_SIZE * layout::EDID_MAX_BLOCKS + 1, 0);
        let report = decode_bytes("inline", &edid);
        assert_eq!(report.status, STATUS_REJECTED);
        assert_eq!(report.rejection.unwrap().id, "invalid-size");
    }

    #[test]
    fn staging_is_cleared_between_inputs() {
        let mut dispatcher: Dispatcher<ChecksumEngine, CollectingSink, 128, 4> =
            Dispatcher::new(ChecksumEngine::new());
        let first = decode_with(&mut dispatcher, "first", &base_block());
        assert_eq!(first.status, 0);

        let second = decode_with(&mut dispatcher, "second", &[0u8; 200]);
        assert_eq!(second.status, STATUS_REJECTED);
        assert_eq!(dispatcher.staging().as_slice()[1], 0);
    }

    #[test]
    fn epoch_formats_as_rfc3339() {
        let ts = format_system_time(std::time::UNIX_EPOCH).unwrap();
        assert_eq!(ts, "1970-01-01T00:00:00Z");
    }
}
