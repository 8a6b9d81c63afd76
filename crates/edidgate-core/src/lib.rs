//! Ingestion boundary for an EDID decoder.
//!
//! A host writes raw descriptor bytes into a fixed-capacity staging area and
//! then asks the dispatcher to parse a declared number of them. The
//! dispatcher resets all decoder state, checks the envelope (length within
//! `[page size, capacity]`, fixed 8-byte header), copies the bytes into the
//! engine's working copy and hands off to a `ParseEngine`. What the engine
//! does with the bytes is its own business; its status comes back unchanged.
//!
//! Invariants:
//! - Decoder state is reset at the start of every call, before validation.
//! - The staging capacity is fixed at compile time and never exceeded.
//! - Rejections return `STATUS_REJECTED` and never reach the engine.
//!
//! File loading lives in `source`, the ordered checks in `envelope`, and the
//! serialisable summary of one call in `Report`.
//!
//! # Examples
//! ```
//! use edidgate_core::{ChecksumEngine, Dispatcher, envelope::layout};
//!
//! let mut dispatcher: Dispatcher<ChecksumEngine> = Dispatcher::new(ChecksumEngine::new());
//! let mut block = [0u8; 128];
//! block[..8].copy_from_slice(layout::EDID_HEADER);
//! block[127] = 0u8.wrapping_sub(block.iter().fold(0u8, |a, b| a.wrapping_add(*b)));
//!
//! dispatcher.staging_mut().fill(&block);
//! assert_eq!(dispatcher.parse(128), 0);
//! assert_eq!(dispatcher.state().num_blocks, 1);
//! ```

use serde::{Deserialize, Serialize};

mod decode;
pub mod decoder;
mod diagnostics;
mod dispatch;
pub mod envelope;
mod source;
mod staging;

pub use decode::{DecodeError, decode_bytes, decode_edid_file, decode_with};
pub use decoder::{
    ChecksumEngine, DecoderOptions, DecoderState, MessageKind, ParseEngine,
    STATUS_CONFORMITY_FAILURES,
};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use dispatch::{Dispatcher, STATUS_REJECTED};
pub use envelope::{Envelope, EnvelopeError, validate_envelope};
pub use source::{SourceError, decode_hex_dump, read_edid_file};
pub use staging::StagingArea;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the input has no modification time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Outcome of one dispatch, ready for serialisation.
///
/// # Examples
/// ```
/// use edidgate_core::make_stub_report;
///
/// let report = make_stub_report("monitor.bin", 256);
/// assert_eq!(report.report_version, edidgate_core::REPORT_VERSION);
/// assert!(report.blocks.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp.
    pub generated_at: String,
    pub input: InputInfo,
    /// Status returned by the dispatcher.
    pub status: i32,
    /// `parsed` when the engine ran, `rejected` otherwise.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    /// Recorded descriptor size (0 after a rejection).
    pub edid_size: u64,
    /// Recorded whole-block count (0 after a rejection).
    pub num_blocks: u64,
    pub warnings: u64,
    pub failures: u64,
    /// Blocks with at least one message, ascending.
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path or label as provided.
    pub path: String,
    /// Input size in bytes as read from disk.
    pub bytes: u64,
}

/// Why the envelope check refused the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    /// Stable identifier (`invalid-size` or `no-header`).
    pub id: String,
    pub message: String,
}

/// Messages an engine logged against one block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSummary {
    pub block: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

/// Build a report with base fields filled and no outcome yet.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "edidgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        status: 0,
        outcome: String::new(),
        rejection: None,
        edid_size: 0,
        num_blocks: 0,
        warnings: 0,
        failures: 0,
        blocks: vec![],
    }
}
