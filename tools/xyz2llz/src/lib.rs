//! xyz2llz library
//!
//! Decodes ASCII point lines and streams them into LLZ files. The binary in
//! `main.rs` is a thin wrapper around [`convert::convert_file`].

pub mod convert;
pub mod decode;
pub mod paths;

pub use convert::{
    ConversionSummary, ConvertError, ConvertOptions, DecodePolicy, Progress, convert_file,
    convert_stream,
};
pub use decode::{
    CoordOrder, DecodeError, DecodeMode, decode_bytes, decode_line, split_time,
};
pub use paths::{PathError, TOOL_VERSION, header_comment, normalize_output_path};

// Re-export the container types callers need alongside the converter
pub use llz::{DepthUnits, LlzHeader, LlzRecord, LlzWriter};
