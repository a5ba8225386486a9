//! LLZ header binary format
//!
//! One header per file, written once when the file is created and never
//! touched again. The size fields make the file self-describing, so a reader
//! can locate the record array without any outside knowledge.
//!
//! # Layout
//! ```text
//! 0x00: magic [u8; 4] = b"LLZ\0"
//! 0x04: version u32
//! 0x08: header_size u32 (256)
//! 0x0C: record_size u32 (40)
//! 0x10: time_flag u8 (0 or 1)
//! 0x11: depth_units u8 (DepthUnits code)
//! 0x12: padding (6 bytes)
//! 0x18: comments [u8; 232] (UTF-8, NUL padded)
//! ```

use crate::error::LlzError;
use crate::record::LlzRecord;

/// Magic bytes at the start of every LLZ file
pub const LLZ_MAGIC: &[u8; 4] = b"LLZ\0";

/// Current header version
pub const LLZ_VERSION: u32 = 1;

/// Maximum comment length in bytes
pub const LLZ_COMMENT_LEN: usize = 232;

const COMMENT_OFFSET: usize = 0x18;

/// Unit of the depth values stored in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DepthUnits {
    #[default]
    Meters = 0,
    Feet = 1,
    Fathoms = 2,
    Cubits = 3,
    Willetts = 4,
}

impl DepthUnits {
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Meters),
            1 => Some(Self::Feet),
            2 => Some(Self::Fathoms),
            3 => Some(Self::Cubits),
            4 => Some(Self::Willetts),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Meters => "meters",
            Self::Feet => "feet",
            Self::Fathoms => "fathoms",
            Self::Cubits => "cubits",
            Self::Willetts => "willetts",
        }
    }
}

/// LLZ header (256 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlzHeader {
    /// Provenance text, at most [`LLZ_COMMENT_LEN`] bytes
    pub comments: String,
    /// Every record carries a timestamp
    pub time_flag: bool,
    pub depth_units: DepthUnits,
}

impl LlzHeader {
    pub const SIZE: usize = 256;

    /// Create a header. Comments longer than [`LLZ_COMMENT_LEN`] bytes are
    /// cut at the last character boundary that fits.
    pub fn new(comments: impl Into<String>, time_flag: bool, depth_units: DepthUnits) -> Self {
        let mut comments = comments.into();
        if comments.len() > LLZ_COMMENT_LEN {
            let mut end = LLZ_COMMENT_LEN;
            while !comments.is_char_boundary(end) {
                end -= 1;
            }
            comments.truncate(end);
        }
        Self {
            comments,
            time_flag,
            depth_units,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(LLZ_MAGIC);
        bytes[4..8].copy_from_slice(&LLZ_VERSION.to_le_bytes());
        bytes[8..12].copy_from_slice(&(Self::SIZE as u32).to_le_bytes());
        bytes[12..16].copy_from_slice(&(LlzRecord::SIZE as u32).to_le_bytes());
        bytes[16] = self.time_flag as u8;
        bytes[17] = self.depth_units.as_u8();
        // 0x12..0x18 padding stays 0

        // `new` caps the length, but the field is public
        let comment = self.comments.as_bytes();
        let len = comment.len().min(LLZ_COMMENT_LEN);
        bytes[COMMENT_OFFSET..COMMENT_OFFSET + len].copy_from_slice(&comment[..len]);
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LlzError> {
        if bytes.len() < Self::SIZE {
            return Err(LlzError::TooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if &magic != LLZ_MAGIC {
            return Err(LlzError::BadMagic(magic));
        }

        let version = read_u32(bytes, 4);
        if version != LLZ_VERSION {
            return Err(LlzError::UnsupportedVersion(version));
        }

        check_size("header_size", Self::SIZE, read_u32(bytes, 8))?;
        check_size("record_size", LlzRecord::SIZE, read_u32(bytes, 12))?;

        let time_flag = match bytes[16] {
            0 => false,
            1 => true,
            other => return Err(LlzError::InvalidTimeFlag(other)),
        };
        let depth_units =
            DepthUnits::from_u8(bytes[17]).ok_or(LlzError::UnknownDepthUnits(bytes[17]))?;

        let raw = &bytes[COMMENT_OFFSET..COMMENT_OFFSET + LLZ_COMMENT_LEN];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let comments = std::str::from_utf8(&raw[..end])
            .map_err(|_| LlzError::InvalidComment)?
            .to_string();

        Ok(Self {
            comments,
            time_flag,
            depth_units,
        })
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn check_size(field: &'static str, expected: usize, found: u32) -> Result<(), LlzError> {
    if found as usize != expected {
        return Err(LlzError::LayoutMismatch {
            field,
            expected: expected as u32,
            found,
        });
    }
    Ok(())
}
