//! LLZ: binary point container for gridding input
//!
//! An LLZ file is a fixed-size header followed by a packed array of
//! fixed-size point records, written front to back in a single pass.
//! There is no index and no record count on disk; the count is derived from
//! the file length.
//!
//! # File Layout
//!
//! ```text
//! 0x000: LlzHeader (256 bytes)
//! 0x100: LlzRecord[0] (40 bytes)
//! 0x128: LlzRecord[1] (40 bytes)
//! ...
//! ```
//!
//! All multi-byte values are little-endian. See [`header`] and [`record`]
//! for the field layouts.
//!
//! # Usage
//!
//! ```
//! use llz::{DepthUnits, LlzHeader, LlzReader, LlzRecord, LlzWriter};
//!
//! let header = LlzHeader::new("Created from survey.xyz", false, DepthUnits::Meters);
//! let mut writer = LlzWriter::new(Vec::new(), header).unwrap();
//! writer.append(&LlzRecord::new(41.0, -70.5, 12.5)).unwrap();
//! let bytes = writer.into_inner().unwrap();
//!
//! let len = bytes.len() as u64;
//! let reader = LlzReader::new(std::io::Cursor::new(bytes), len).unwrap();
//! assert_eq!(reader.record_count(), 1);
//! ```

pub mod error;
pub mod header;
pub mod reader;
pub mod record;
pub mod serialization;
pub mod writer;

pub use error::LlzError;
pub use header::{DepthUnits, LLZ_COMMENT_LEN, LLZ_MAGIC, LLZ_VERSION, LlzHeader};
pub use reader::{LlzReader, read_llz};
pub use record::{LlzRecord, NANOS_PER_SEC};
pub use serialization::BinarySerializable;
pub use writer::LlzWriter;

/// File extension for LLZ containers (without the dot)
pub const LLZ_EXT: &str = "llz";

/// Number of whole records stored after the header, or the number of
/// dangling bytes if the file ends in the middle of a record.
pub fn record_count_for_len(file_len: u64) -> Result<u64, LlzError> {
    let header = LlzHeader::SIZE as u64;
    let record = LlzRecord::SIZE as u64;

    if file_len < header {
        return Err(LlzError::TooShort {
            expected: LlzHeader::SIZE,
            actual: file_len as usize,
        });
    }

    let data = file_len - header;
    let trailing = data % record;
    if trailing != 0 {
        return Err(LlzError::TruncatedRecord {
            trailing_bytes: trailing as usize,
        });
    }
    Ok(data / record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count_for_len() {
        assert_eq!(record_count_for_len(256).unwrap(), 0);
        assert_eq!(record_count_for_len(256 + 40 * 3).unwrap(), 3);
    }

    #[test]
    fn test_record_count_truncated() {
        let err = record_count_for_len(256 + 40 + 7).unwrap_err();
        assert!(matches!(err, LlzError::TruncatedRecord { trailing_bytes: 7 }));
    }

    #[test]
    fn test_record_count_short_file() {
        let err = record_count_for_len(100).unwrap_err();
        assert!(matches!(err, LlzError::TooShort { .. }));
    }
}
