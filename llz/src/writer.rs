//! Sequential LLZ writer
//!
//! The writer owns the output handle from creation until [`LlzWriter::close`].
//! Creating a writer writes the header; each [`LlzWriter::append`] writes one
//! record directly after the previous one. Nothing already written is ever
//! revisited, so a file is valid up to its last complete record even if the
//! process dies mid-stream.
//!
//! ```text
//! create() ──► Open ──append()──► Open ──close()──► Closed
//! ```
//!
//! Appending to or closing a closed writer returns
//! [`LlzError::InvalidState`]. Dropping a writer that is still open flushes
//! it and releases the handle.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::LlzError;
use crate::header::LlzHeader;
use crate::record::LlzRecord;

/// Append-only LLZ writer over any byte sink
pub struct LlzWriter<W: Write = BufWriter<File>> {
    inner: Option<W>,
    header: LlzHeader,
    records_written: u64,
    path: Option<PathBuf>,
}

impl LlzWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write `header` to it.
    pub fn create(path: impl AsRef<Path>, header: LlzHeader) -> Result<Self, LlzError> {
        let path = path.as_ref();
        let create_err = |source| LlzError::Create {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(create_err)?;
        let mut writer = Self::start(BufWriter::new(file), header).map_err(create_err)?;
        writer.path = Some(path.to_path_buf());

        tracing::debug!("Created LLZ file {:?}", path);
        Ok(writer)
    }
}

impl<W: Write> LlzWriter<W> {
    /// Write `header` to `inner` and return an open writer.
    pub fn new(inner: W, header: LlzHeader) -> Result<Self, LlzError> {
        Ok(Self::start(inner, header)?)
    }

    fn start(mut inner: W, header: LlzHeader) -> io::Result<Self> {
        inner.write_all(&header.to_bytes())?;
        Ok(Self {
            inner: Some(inner),
            header,
            records_written: 0,
            path: None,
        })
    }

    /// Append one record after the last one written.
    pub fn append(&mut self, record: &LlzRecord) -> Result<(), LlzError> {
        let inner = self
            .inner
            .as_mut()
            .ok_or(LlzError::InvalidState("append after close"))?;
        inner.write_all(&record.to_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush and release the output. The writer cannot be used afterwards.
    pub fn close(&mut self) -> Result<(), LlzError> {
        let mut inner = self
            .inner
            .take()
            .ok_or(LlzError::InvalidState("close called twice"))?;
        inner.flush()?;

        tracing::debug!(
            "Closed LLZ output {:?} ({} records)",
            self.path.as_deref().unwrap_or(Path::new("<stream>")),
            self.records_written
        );
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> Result<W, LlzError> {
        let mut inner = self
            .inner
            .take()
            .ok_or(LlzError::InvalidState("writer already closed"))?;
        inner.flush()?;
        Ok(inner)
    }

    pub fn header(&self) -> &LlzHeader {
        &self.header
    }

    /// Number of records appended so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Bytes written so far (header plus records)
    pub fn bytes_written(&self) -> u64 {
        LlzHeader::SIZE as u64 + self.records_written * LlzRecord::SIZE as u64
    }
}

impl<W: Write> Drop for LlzWriter<W> {
    fn drop(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            if let Err(e) = inner.flush() {
                tracing::warn!("Failed to flush LLZ output on drop: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::DepthUnits;

    fn header() -> LlzHeader {
        LlzHeader::new("test", false, DepthUnits::Meters)
    }

    #[test]
    fn test_new_writes_header() {
        let writer = LlzWriter::new(Vec::new(), header()).unwrap();
        assert!(writer.is_open());
        assert_eq!(writer.records_written(), 0);

        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes.len(), LlzHeader::SIZE);
        assert_eq!(LlzHeader::from_bytes(&bytes).unwrap(), header());
    }

    #[test]
    fn test_each_append_adds_one_record() {
        let mut writer = LlzWriter::new(Vec::new(), header()).unwrap();
        for i in 0..5 {
            writer
                .append(&LlzRecord::new(i as f64, -(i as f64), i as f32))
                .unwrap();
            assert_eq!(
                writer.bytes_written(),
                (LlzHeader::SIZE + (i + 1) * LlzRecord::SIZE) as u64
            );
        }
        assert_eq!(writer.records_written(), 5);

        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes.len(), LlzHeader::SIZE + 5 * LlzRecord::SIZE);

        let third = &bytes[LlzHeader::SIZE + 2 * LlzRecord::SIZE..];
        assert_eq!(
            LlzRecord::from_bytes(third).unwrap(),
            LlzRecord::new(2.0, -2.0, 2.0)
        );
    }

    #[test]
    fn test_append_after_close_is_invalid_state() {
        let mut writer = LlzWriter::new(Vec::new(), header()).unwrap();
        writer.close().unwrap();
        assert!(!writer.is_open());

        let err = writer.append(&LlzRecord::default()).unwrap_err();
        assert!(matches!(err, LlzError::InvalidState(_)));
        assert_eq!(writer.records_written(), 0);
    }

    #[test]
    fn test_double_close_is_invalid_state() {
        let mut writer = LlzWriter::new(Vec::new(), header()).unwrap();
        writer.close().unwrap();
        assert!(matches!(writer.close(), Err(LlzError::InvalidState(_))));
    }

    struct FailingSink {
        accept: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accept == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.accept);
            self.accept -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let sink = FailingSink {
            accept: LlzHeader::SIZE + LlzRecord::SIZE,
        };
        let mut writer = LlzWriter::new(sink, header()).unwrap();
        writer.append(&LlzRecord::default()).unwrap();

        let err = writer.append(&LlzRecord::default()).unwrap_err();
        assert!(matches!(err, LlzError::Write(_)));
        assert_eq!(writer.records_written(), 1);
    }

    #[test]
    fn test_header_write_failure() {
        let sink = FailingSink { accept: 10 };
        assert!(matches!(
            LlzWriter::new(sink, header()),
            Err(LlzError::Write(_))
        ));
    }
}
