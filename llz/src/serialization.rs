//! Binary serialization trait for LLZ structures.
//!
//! Both the header and the record implement `BinarySerializable`, which lets
//! the reader pull either one off a stream with the same code. Each type
//! keeps its own `to_bytes()` returning a fixed-size array for the writer's
//! hot path.

use std::io::Read;

use crate::error::LlzError;
use crate::header::LlzHeader;
use crate::record::LlzRecord;

/// Trait for fixed-size LLZ structures.
///
/// The trait returns `Vec<u8>` because associated consts cannot yet size
/// an array in a return type (`[u8; Self::SIZE]`).
pub trait BinarySerializable: Sized {
    /// Size of the serialized structure in bytes.
    const SIZE: usize;

    fn serialize(&self) -> Vec<u8>;

    fn deserialize(bytes: &[u8]) -> Result<Self, LlzError>;

    /// Read exactly `SIZE` bytes from `reader` and decode them.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self, LlzError> {
        let mut buf = vec![0u8; Self::SIZE];
        reader.read_exact(&mut buf).map_err(LlzError::Read)?;
        Self::deserialize(&buf)
    }
}

impl BinarySerializable for LlzHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Result<Self, LlzError> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for LlzRecord {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Result<Self, LlzError> {
        Self::from_bytes(bytes)
    }
}
