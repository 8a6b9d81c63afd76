//! Descriptor envelope checks.
//!
//! The envelope is everything that can be said about a buffer before any
//! descriptor field is interpreted: its declared length must fall within
//! `[page size, staging capacity]` and its first eight bytes must carry the
//! fixed EDID header. Nothing here looks past the header.
//!
//! Layering follows the rest of the crate:
//! - `layout`: byte offsets, sizes and the header signature
//! - `reader`: bounds-checked access to a staged buffer
//! - `parser`: the ordered gate (lower bound, upper bound, header)
//! - `error`: the two rejection kinds

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::EnvelopeError;
pub use parser::{Envelope, validate_envelope};
