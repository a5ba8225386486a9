//! Text-to-LLZ conversion driver
//!
//! Reads the input one line at a time and feeds decoded records to an
//! [`LlzWriter`]. Each line is fully handled before the next is read.
//!
//! Line handling:
//! - first byte `#`: comment, skipped
//! - empty or whitespace only: skipped
//! - anything else: decoded, depth negated if requested, appended
//!
//! Progress is handed to a caller-supplied callback after every line rather
//! than kept in shared state; the caller decides how (or whether) to show it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use llz::{DepthUnits, LlzError, LlzHeader, LlzWriter};

use crate::decode::{CoordOrder, DecodeError, DecodeMode, decode_bytes};
use crate::paths::header_comment;

/// What to do with a line that does not decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Log a warning, count the line as rejected, keep going
    #[default]
    Skip,
    /// Stop the conversion with [`ConvertError::Decode`]
    Abort,
}

/// Resolved conversion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub order: CoordOrder,
    /// Input lines carry a fourth time field
    pub has_time: bool,
    /// Negate every depth before writing
    pub invert_depth: bool,
    pub policy: DecodePolicy,
    pub depth_units: DepthUnits,
}

impl ConvertOptions {
    pub fn new(order: CoordOrder) -> Self {
        Self {
            order,
            has_time: false,
            invert_depth: false,
            policy: DecodePolicy::default(),
            depth_units: DepthUnits::default(),
        }
    }

    pub fn with_time(mut self, has_time: bool) -> Self {
        self.has_time = has_time;
        self
    }

    pub fn with_invert_depth(mut self, invert_depth: bool) -> Self {
        self.invert_depth = invert_depth;
        self
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_depth_units(mut self, depth_units: DepthUnits) -> Self {
        self.depth_units = depth_units;
        self
    }

    pub fn decode_mode(&self) -> DecodeMode {
        DecodeMode::new(self.order, self.has_time)
    }
}

/// Running position, reported after each input line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Input bytes consumed so far, line terminators included
    pub bytes_read: u64,
    pub records_written: u64,
}

impl Progress {
    /// Whole percent of `total_bytes` consumed, capped at 100.
    pub fn percent(&self, total_bytes: u64) -> u8 {
        if total_bytes == 0 {
            return 100;
        }
        (self.bytes_read.saturating_mul(100) / total_bytes).min(100) as u8
    }
}

/// Line and record counts for a finished conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub lines_read: u64,
    pub comments_skipped: u64,
    pub blank_skipped: u64,
    /// Undecodable lines dropped under [`DecodePolicy::Skip`]
    pub lines_rejected: u64,
    pub records_written: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to open input {path:?}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input line {line}: {source}")]
    ReadInput {
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {source}")]
    Decode {
        line: u64,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Llz(#[from] LlzError),
}

/// Convert every line of `input` into records appended to `writer`.
///
/// The writer is left open; closing it is the caller's job.
pub fn convert_stream<R, W, F>(
    mut input: R,
    writer: &mut LlzWriter<W>,
    options: &ConvertOptions,
    mut on_progress: F,
) -> Result<ConversionSummary, ConvertError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Progress),
{
    let mode = options.decode_mode();
    let mut summary = ConversionSummary::default();
    let mut progress = Progress::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .map_err(|source| ConvertError::ReadInput {
                line: summary.lines_read + 1,
                source,
            })?;
        if n == 0 {
            break;
        }
        summary.lines_read += 1;
        progress.bytes_read += n as u64;

        let line = trim_line_end(&buf);
        if line.first() == Some(&b'#') {
            summary.comments_skipped += 1;
        } else if line.iter().all(u8::is_ascii_whitespace) {
            summary.blank_skipped += 1;
        } else {
            match decode_bytes(line, mode) {
                Ok(record) => {
                    let record = if options.invert_depth {
                        record.inverted()
                    } else {
                        record
                    };
                    writer.append(&record)?;
                    summary.records_written += 1;
                }
                Err(source) => match options.policy {
                    DecodePolicy::Skip => {
                        tracing::warn!("Skipping line {}: {}", summary.lines_read, source);
                        summary.lines_rejected += 1;
                    }
                    DecodePolicy::Abort => {
                        return Err(ConvertError::Decode {
                            line: summary.lines_read,
                            source,
                        });
                    }
                },
            }
        }

        progress.records_written = summary.records_written;
        on_progress(&progress);
    }

    Ok(summary)
}

/// Strip the `\n` / `\r\n` terminator.
fn trim_line_end(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}

/// Convert the text file at `input` into a new LLZ file at `output`.
///
/// `output` is used as given; see [`crate::normalize_output_path`]. On error
/// the output handle is still released and whatever was appended stays on
/// disk.
pub fn convert_file<F>(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    on_progress: F,
) -> Result<ConversionSummary, ConvertError>
where
    F: FnMut(&Progress),
{
    let file = File::open(input).map_err(|source| ConvertError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;

    let header = LlzHeader::new(header_comment(input), options.has_time, options.depth_units);
    let mut writer = LlzWriter::create(output, header)?;

    let summary = convert_stream(BufReader::new(file), &mut writer, options, on_progress)?;
    writer.close()?;

    tracing::debug!(
        "Converted {:?} -> {:?}: {} lines, {} records",
        input,
        output,
        summary.lines_read,
        summary.records_written
    );
    Ok(summary)
}
