//! The single entry point into parsing.
//!
//! A `Dispatcher` owns every buffer a parse touches: the staging area the
//! host writes into, the working copy the engine reads, and the decoder
//! state. Each call runs the same sequence:
//!
//! 1. reset decoder state and the engine, unconditionally
//! 2. reject lengths below one page
//! 3. reject lengths above the staging capacity
//! 4. reject buffers without the EDID header
//! 5. copy the declared bytes into the working copy
//! 6. record size and whole-block count
//! 7. run the engine and return its status untouched
//!
//! The reset comes first so a rejected call still leaves clean state behind
//! for the next one. Rejections return `STATUS_REJECTED` and go to the
//! diagnostic sink; the engine is not invoked.
//!
//! All mutating operations take `&mut self`: two dispatches, or a dispatch
//! and a staging write, cannot overlap.

use std::ptr::NonNull;

use crate::decoder::{DecoderState, ParseEngine};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::envelope::layout::{self, EDID_MAX_BLOCKS, EDID_PAGE_SIZE};
use crate::envelope::{EnvelopeError, validate_envelope};
use crate::staging::StagingArea;

/// Status returned by `parse` when the envelope is rejected.
pub const STATUS_REJECTED: i32 = -1;

/// Envelope gate and handoff to a `ParseEngine`.
///
/// `PAGE` and `MAX_BLOCKS` fix the geometry at compile time; the staging
/// capacity is `PAGE * MAX_BLOCKS`.
///
/// # Examples
/// ```
/// use edidgate_core::{ChecksumEngine, Dispatcher, STATUS_REJECTED};
///
/// let mut dispatcher: Dispatcher<ChecksumEngine> = Dispatcher::new(ChecksumEngine::new());
/// assert_eq!(dispatcher.buffer_capacity(), 128 * 256);
///
/// // Nothing staged yet: the header check fails.
/// assert_eq!(dispatcher.parse(128), STATUS_REJECTED);
/// ```
pub struct Dispatcher<
    E,
    S = TracingSink,
    const PAGE: usize = { EDID_PAGE_SIZE },
    const MAX_BLOCKS: usize = { EDID_MAX_BLOCKS },
> {
    staging: StagingArea,
    working: Box<[u8]>,
    state: DecoderState,
    engine: E,
    sink: S,
}

impl<E, S, const PAGE: usize, const MAX_BLOCKS: usize> Dispatcher<E, S, PAGE, MAX_BLOCKS>
where
    E: ParseEngine,
    S: DiagnosticSink,
{
    pub const CAPACITY: usize = {
        assert!(PAGE >= layout::HEADER_RANGE.end);
        assert!(MAX_BLOCKS > 0);
        layout::staging_capacity(PAGE, MAX_BLOCKS)
    };

    pub fn new(engine: E) -> Self
    where
        S: Default,
    {
        Self::with_sink(engine, S::default())
    }

    pub fn with_sink(engine: E, sink: S) -> Self {
        Self {
            staging: StagingArea::new(Self::CAPACITY),
            working: vec![0u8; Self::CAPACITY].into_boxed_slice(),
            state: DecoderState::new(MAX_BLOCKS),
            engine,
            sink,
        }
    }

    /// Start of the staging region; stable for the dispatcher's lifetime.
    pub fn buffer_address(&self) -> NonNull<u8> {
        self.staging.address()
    }

    pub fn buffer_capacity(&self) -> usize {
        self.staging.capacity()
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    /// Validate `declared_length` staged bytes and run the engine.
    ///
    /// Returns the engine's status, or `STATUS_REJECTED` after reporting the
    /// rejection to the sink.
    pub fn parse(&mut self, declared_length: usize) -> i32 {
        match self.try_parse(declared_length) {
            Ok(status) => status,
            Err(err) => {
                self.sink.report(&err);
                STATUS_REJECTED
            }
        }
    }

    /// Same sequence as `parse`, but rejections come back as typed errors
    /// and are not reported to the sink.
    ///
    /// # Errors
    /// `EnvelopeError::InvalidSize` or `EnvelopeError::NoHeader`; state has
    /// already been reset when either is returned.
    pub fn try_parse(&mut self, declared_length: usize) -> Result<i32, EnvelopeError> {
        self.state.reset();
        self.engine.reset();

        let envelope = validate_envelope(self.staging.as_slice(), PAGE, declared_length)?;

        let size = envelope.size;
        self.working[..size].copy_from_slice(&self.staging.as_slice()[..size]);
        self.state.record_size(size, envelope.num_blocks);

        tracing::debug!(size, blocks = envelope.num_blocks, "dispatching descriptor");
        Ok(self.engine.run(&self.working[..size], &mut self.state))
    }

    /// Decoder state left by the most recent call.
    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Working copy as last populated. Only the first `state().edid_size`
    /// bytes belong to the most recent call.
    pub fn working_copy(&self) -> &[u8] {
        &self.working
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<E, S, const PAGE: usize, const MAX_BLOCKS: usize> std::fmt::Debug
    for Dispatcher<E, S, PAGE, MAX_BLOCKS>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("page_size", &PAGE)
            .field("max_blocks", &MAX_BLOCKS)
            .field("staging", &self.staging)
            .field("edid_size", &self.state.edid_size)
            .field("num_blocks", &self.state.num_blocks)
            .finish()
    }
}
