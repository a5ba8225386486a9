//! Point line decoder (one text line -> one LLZ record)
//!
//! Accepted line shapes:
//! ```text
//! lon,lat,z[,t]      lon lat z [t]      (CoordOrder::LonLat, .xyz)
//! lat,lon,z[,t]      lat lon z [t]      (CoordOrder::LatLon, .yxz)
//! ```
//!
//! The delimiter is chosen per line: any comma makes the whole line
//! comma-separated, otherwise fields are split on whitespace. Fields past
//! the expected count are ignored. `t` is fractional seconds since
//! 1970-01-01T00:00:00Z.

use llz::{LlzRecord, NANOS_PER_SEC};

/// Which coordinate comes first on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordOrder {
    /// lon, lat, depth (`.xyz`)
    LonLat,
    /// lat, lon, depth (`.yxz`)
    LatLon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeMode {
    pub order: CoordOrder,
    /// A fourth field holds the timestamp
    pub has_time: bool,
}

impl DecodeMode {
    pub fn new(order: CoordOrder, has_time: bool) -> Self {
        Self { order, has_time }
    }

    fn field_count(self) -> usize {
        if self.has_time { 4 } else { 3 }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Decode a raw input line; non-UTF-8 bytes are a decode failure.
pub fn decode_bytes(line: &[u8], mode: DecodeMode) -> Result<LlzRecord, DecodeError> {
    let line = std::str::from_utf8(line).map_err(|_| DecodeError::InvalidUtf8)?;
    decode_line(line, mode)
}

/// Decode one non-comment line into a record with zero status.
pub fn decode_line(line: &str, mode: DecodeMode) -> Result<LlzRecord, DecodeError> {
    let comma = line.contains(',');
    let mut fields: Vec<&str> = if comma {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };

    let expected = mode.field_count();
    if fields.len() < expected {
        return Err(DecodeError::MissingField {
            expected,
            found: fields.len(),
        });
    }

    // "1,2,3 junk": text after the last expected number is ignored
    if comma {
        let last: &str = fields[expected - 1];
        fields[expected - 1] = last.split_whitespace().next().unwrap_or("");
    }

    let (lat, lon) = match mode.order {
        CoordOrder::LonLat => {
            let lon = parse_f64("longitude", fields[0])?;
            let lat = parse_f64("latitude", fields[1])?;
            (lat, lon)
        }
        CoordOrder::LatLon => {
            let lat = parse_f64("latitude", fields[0])?;
            let lon = parse_f64("longitude", fields[1])?;
            (lat, lon)
        }
    };
    let depth = parse_f32("depth", fields[2])?;

    let mut record = LlzRecord::new(lat, lon, depth);
    if mode.has_time {
        let (tv_sec, tv_nsec) = split_time(parse_f64("time", fields[3])?)
            .ok_or(DecodeError::OutOfRange { field: "time" })?;
        record = record.with_time(tv_sec, tv_nsec);
    }
    Ok(record)
}

/// Split fractional epoch seconds into whole seconds and a nanosecond
/// remainder in `0..NANOS_PER_SEC`, rounding to the nearest nanosecond.
///
/// Returns `None` when `t` is not finite or its whole seconds do not fit
/// in an `i64`.
pub fn split_time(t: f64) -> Option<(i64, u32)> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    const SEC_LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let whole = t.floor();
    if !whole.is_finite() || whole < -SEC_LIMIT || whole >= SEC_LIMIT {
        return None;
    }
    let mut tv_sec = whole as i64;
    let mut tv_nsec = ((t - whole) * NANOS_PER_SEC as f64).round() as u32;

    // 0.9999999996 rounds up to a full second
    if tv_nsec >= NANOS_PER_SEC {
        tv_sec += 1;
        tv_nsec -= NANOS_PER_SEC;
    }
    Some((tv_sec, tv_nsec))
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, DecodeError> {
    let parsed: f64 = value.parse().map_err(|_| DecodeError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(DecodeError::NonFinite { field });
    }
    Ok(parsed)
}

fn parse_f32(field: &'static str, value: &str) -> Result<f32, DecodeError> {
    let parsed: f32 = value.parse().map_err(|_| DecodeError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(DecodeError::NonFinite { field });
    }
    Ok(parsed)
}
