//! LLZ point record binary format
//!
//! # Layout
//! ```text
//! 0x00: lat f64 (degrees)
//! 0x08: lon f64 (degrees)
//! 0x10: tv_sec i64 (seconds since 1970-01-01T00:00:00Z)
//! 0x18: tv_nsec u32 (0..1_000_000_000)
//! 0x1C: depth f32 (units from header)
//! 0x20: status u32
//! 0x24: padding (4 bytes)
//! ```

use crate::error::LlzError;

/// Nanoseconds per second
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// One geodetic point (40 bytes on disk)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LlzRecord {
    pub lat: f64,
    pub lon: f64,
    pub depth: f32,
    /// Reserved for downstream editing, 0 on creation
    pub status: u32,
    pub tv_sec: i64,
    pub tv_nsec: u32,
}

impl LlzRecord {
    pub const SIZE: usize = 40;

    /// Create an untimed record with zero status
    pub fn new(lat: f64, lon: f64, depth: f32) -> Self {
        Self {
            lat,
            lon,
            depth,
            ..Self::default()
        }
    }

    pub fn with_time(mut self, tv_sec: i64, tv_nsec: u32) -> Self {
        self.tv_sec = tv_sec;
        self.tv_nsec = tv_nsec;
        self
    }

    /// Same record with the depth sign flipped
    pub fn inverted(mut self) -> Self {
        self.depth = -self.depth;
        self
    }

    /// Timestamp as fractional seconds since the epoch
    pub fn time_seconds(&self) -> f64 {
        self.tv_sec as f64 + self.tv_nsec as f64 / NANOS_PER_SEC as f64
    }

    /// Write record to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&self.lat.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.lon.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.tv_sec.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.tv_nsec.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.depth.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.status.to_le_bytes());
        // padding bytes stay 0
        bytes
    }

    /// Read record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LlzError> {
        if bytes.len() < Self::SIZE {
            return Err(LlzError::TooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            lat: f64::from_le_bytes(array8(bytes, 0)),
            lon: f64::from_le_bytes(array8(bytes, 8)),
            tv_sec: i64::from_le_bytes(array8(bytes, 16)),
            tv_nsec: u32::from_le_bytes(array4(bytes, 24)),
            depth: f32::from_le_bytes(array4(bytes, 28)),
            status: u32::from_le_bytes(array4(bytes, 32)),
        })
    }
}

fn array8(bytes: &[u8], offset: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[offset..offset + 8]);
    out
}

fn array4(bytes: &[u8], offset: usize) -> [u8; 4] {
    [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        let record = LlzRecord::new(1.0, -2.0, 3.5).with_time(7, 9);
        let bytes = record.to_bytes();

        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &(-2.0f64).to_le_bytes());
        assert_eq!(&bytes[16..24], &7i64.to_le_bytes());
        assert_eq!(&bytes[24..28], &9u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &3.5f32.to_le_bytes());
        assert_eq!(&bytes[32..36], &[0, 0, 0, 0]);
        assert_eq!(&bytes[36..40], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_record_roundtrip() {
        let record = LlzRecord {
            lat: 41.0,
            lon: -70.5,
            depth: 12.5,
            status: 3,
            tv_sec: -86_400,
            tv_nsec: 250_000_000,
        };
        assert_eq!(LlzRecord::from_bytes(&record.to_bytes()).unwrap(), record);
    }

    #[test]
    fn test_new_has_zero_status_and_time() {
        let record = LlzRecord::new(41.0, -70.5, 100.0);
        assert_eq!(record.status, 0);
        assert_eq!(record.tv_sec, 0);
        assert_eq!(record.tv_nsec, 0);
    }

    #[test]
    fn test_double_inversion_is_identity() {
        for depth in [0.0f32, 100.0, -50.0, 12.345, f32::MAX, -f32::MIN_POSITIVE] {
            let record = LlzRecord::new(0.0, 0.0, depth);
            assert_eq!(record.inverted().inverted(), record);
            assert_eq!(record.inverted().depth, -depth);
        }
    }

    #[test]
    fn test_time_seconds() {
        let record = LlzRecord::new(0.0, 0.0, 0.0).with_time(1_000_000_000, 250_000_000);
        assert_eq!(record.time_seconds(), 1_000_000_000.25);
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(matches!(
            LlzRecord::from_bytes(&[0; 39]),
            Err(LlzError::TooShort {
                expected: 40,
                actual: 39
            })
        ));
    }
}
