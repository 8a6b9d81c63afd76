//! Loading descriptor bytes from files.
//!
//! Sources only read and normalise input; they never validate the envelope.
//! Binary dumps are passed through as-is, hex dumps are decoded.

mod file;

pub use file::{decode_hex_dump, read_edid_file};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("hex dump error: {0}")]
    Hex(#[from] hex::FromHexError),
}
