//! Decoder-visible state and the contract a parse engine implements.
//!
//! The dispatcher owns a `DecoderState` and hands it to the engine together
//! with the validated working copy. Engines own their decoding logic; the
//! dispatcher never looks at what they log or return.

mod checksum;
mod messages;
mod options;
mod state;

pub use checksum::{ChecksumEngine, STATUS_CONFORMITY_FAILURES};
pub use messages::{MessageKind, MessageLogs};
pub use options::DecoderOptions;
pub use state::DecoderState;

/// A descriptor parser driven by the dispatcher.
///
/// `run` sees the validated bytes (exactly the declared length) and a state
/// that was reset and then given its recorded size and block count. The
/// returned status is passed to the caller unchanged; `-1` is reserved by
/// the dispatcher for envelope rejections.
pub trait ParseEngine {
    /// Clear engine-private state. Called before every dispatch, ahead of
    /// any validation.
    fn reset(&mut self) {}

    fn run(&mut self, edid: &[u8], state: &mut DecoderState) -> i32;
}
