use super::messages::{MessageKind, MessageLogs};
use super::options::DecoderOptions;

/// Mutable state a parse engine reads and writes during one call.
///
/// Reset at the start of every dispatcher call, never at the end, so the
/// outcome of call N stays inspectable until call N+1 begins.
#[derive(Debug, Clone)]
pub struct DecoderState {
    pub options: DecoderOptions,
    messages: MessageLogs,
    /// Recorded descriptor size in bytes (the declared length).
    pub edid_size: usize,
    /// Whole blocks in `edid_size`.
    pub num_blocks: usize,
    /// Block currently being decoded.
    pub block_nr: usize,
    pub warnings: usize,
    pub failures: usize,
}

impl DecoderState {
    pub fn new(max_blocks: usize) -> Self {
        Self {
            options: DecoderOptions::default(),
            messages: MessageLogs::new(max_blocks),
            edid_size: 0,
            num_blocks: 0,
            block_nr: 0,
            warnings: 0,
            failures: 0,
        }
    }

    /// Restore the initial configuration: empty logs for every block,
    /// default options, zeroed counters.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.options = DecoderOptions::default();
        self.edid_size = 0;
        self.num_blocks = 0;
        self.block_nr = 0;
        self.warnings = 0;
        self.failures = 0;
    }

    pub fn record_size(&mut self, size: usize, num_blocks: usize) {
        self.edid_size = size;
        self.num_blocks = num_blocks;
    }

    /// Log against `block` and bump the matching counter. Messages for a
    /// block without a slot are counted but not stored.
    pub fn log(&mut self, block: usize, kind: MessageKind, message: impl Into<String>) {
        match kind {
            MessageKind::Warning => self.warnings += 1,
            MessageKind::Failure => self.failures += 1,
        }
        self.messages.push(block, kind, message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.log(self.block_nr, MessageKind::Failure, message);
    }

    pub fn messages(&self) -> &MessageLogs {
        &self.messages
    }

    pub fn messages_for(&self, block: usize, kind: MessageKind) -> &[String] {
        self.messages.get(block, kind)
    }

    /// No messages, no counters, default options and no recorded size.
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
            && self.options == DecoderOptions::default()
            && self.edid_size == 0
            && self.num_blocks == 0
            && self.block_nr == 0
            && self.warnings == 0
            && self.failures == 0
    }
}
