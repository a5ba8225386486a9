//! Error type for LLZ reading and writing.

use std::io;
use std::path::PathBuf;

/// Errors produced by the LLZ header/record codecs, writer, and reader.
#[derive(Debug, thiserror::Error)]
pub enum LlzError {
    /// Output file could not be created or its header could not be written
    #[error("failed to create LLZ file {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Existing LLZ file could not be opened
    #[error("failed to open LLZ file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while appending, flushing, or closing
    #[error("LLZ write failed: {0}")]
    Write(#[from] io::Error),

    /// I/O failure while reading records back
    #[error("LLZ read failed: {0}")]
    Read(#[source] io::Error),

    /// Operation is not valid in the writer's current state
    #[error("invalid LLZ writer state: {0}")]
    InvalidState(&'static str),

    /// Not enough bytes for a header or record
    #[error("LLZ data too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// File does not start with the LLZ magic bytes
    #[error("bad LLZ magic {0:?}")]
    BadMagic([u8; 4]),

    /// Header version is not one this crate understands
    #[error("unsupported LLZ version {0}")]
    UnsupportedVersion(u32),

    /// Header declares a layout size that differs from this crate's
    #[error("LLZ {field} is {found}, expected {expected}")]
    LayoutMismatch {
        field: &'static str,
        expected: u32,
        found: u32,
    },

    /// time_flag byte is neither 0 nor 1
    #[error("invalid LLZ time flag {0}")]
    InvalidTimeFlag(u8),

    /// depth_units code outside the known range
    #[error("unknown LLZ depth units code {0}")]
    UnknownDepthUnits(u8),

    /// Comment bytes are not valid UTF-8
    #[error("LLZ header comment is not valid UTF-8")]
    InvalidComment,

    /// File length leaves a partial record after the last whole one
    #[error("LLZ file ends with a truncated record ({trailing_bytes} trailing bytes)")]
    TruncatedRecord { trailing_bytes: usize },
}
