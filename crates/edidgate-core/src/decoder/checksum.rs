use super::{DecoderState, MessageKind, ParseEngine};
use crate::envelope::layout;
use crate::envelope::reader::EnvelopeReader;

/// Status returned when conformity checks are on and a failure was logged.
pub const STATUS_CONFORMITY_FAILURES: i32 = -2;

/// Reference engine that checks block framing only.
///
/// Every whole block must sum to zero modulo 256, the base block's
/// extension count should match the blocks present, and a partial trailing
/// page is reported. No descriptor field is interpreted.
#[derive(Debug, Clone)]
pub struct ChecksumEngine {
    page_size: usize,
}

impl ChecksumEngine {
    pub fn new() -> Self {
        Self::with_page_size(layout::EDID_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }
}

impl Default for ChecksumEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseEngine for ChecksumEngine {
    fn run(&mut self, edid: &[u8], state: &mut DecoderState) -> i32 {
        let reader = EnvelopeReader::new(edid, self.page_size);
        for block in 0..state.num_blocks {
            let Some(page) = reader.page(block) else {
                break;
            };
            state.block_nr = block;
            check_block_checksum(page, state);
        }

        if let Some(declared) = edid.get(layout::EXTENSION_COUNT_OFFSET) {
            let declared = *declared as usize;
            let present = state.num_blocks.saturating_sub(1);
            if declared != present {
                state.log(
                    0,
                    MessageKind::Warning,
                    format!(
                        "base block declares {declared} extension block(s), {present} present"
                    ),
                );
            }
        }

        let trailing = edid.len() % self.page_size;
        if trailing != 0 {
            state.log(
                state.num_blocks,
                MessageKind::Warning,
                format!("{trailing} trailing byte(s) after the last whole block ignored"),
            );
        }

        if state.options.check && state.failures > 0 {
            STATUS_CONFORMITY_FAILURES
        } else {
            0
        }
    }
}

fn check_block_checksum(page: &[u8], state: &mut DecoderState) {
    let sum = page.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum == 0 {
        return;
    }
    let Some(&stored) = page.last() else {
        return;
    };
    let expected = stored.wrapping_sub(sum);
    state.fail(format!("checksum is 0x{stored:02x}, should be 0x{expected:02x}"));
}
