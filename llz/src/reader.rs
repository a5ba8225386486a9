//! Sequential LLZ reader
//!
//! Validates the header and derives the record count from the total data
//! length. A file whose length leaves a partial record after the header is
//! rejected up front with [`LlzError::TruncatedRecord`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::LlzError;
use crate::header::LlzHeader;
use crate::record::LlzRecord;
use crate::record_count_for_len;
use crate::serialization::BinarySerializable;

pub struct LlzReader<R: Read = BufReader<File>> {
    inner: R,
    header: LlzHeader,
    record_count: u64,
    next_record: u64,
}

impl LlzReader<BufReader<File>> {
    /// Open an LLZ file and read its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LlzError> {
        let path = path.as_ref();
        let open_err = |source| LlzError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();
        Self::new(BufReader::new(file), len)
    }
}

impl<R: Read> LlzReader<R> {
    /// Read the header from `inner`, which holds `data_len` bytes in total.
    pub fn new(mut inner: R, data_len: u64) -> Result<Self, LlzError> {
        let record_count = record_count_for_len(data_len)?;
        let header = LlzHeader::read_from(&mut inner)?;
        Ok(Self {
            inner,
            header,
            record_count,
            next_record: 0,
        })
    }

    pub fn header(&self) -> &LlzHeader {
        &self.header
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Read the next record, or `None` after the last one.
    pub fn read_record(&mut self) -> Result<Option<LlzRecord>, LlzError> {
        if self.next_record >= self.record_count {
            return Ok(None);
        }
        let record = LlzRecord::read_from(&mut self.inner)?;
        self.next_record += 1;
        Ok(Some(record))
    }

    /// Iterate over the remaining records in file order.
    pub fn records(&mut self) -> impl Iterator<Item = Result<LlzRecord, LlzError>> + '_ {
        std::iter::from_fn(move || self.read_record().transpose())
    }
}

/// Read a whole LLZ file into memory.
pub fn read_llz(path: impl AsRef<Path>) -> Result<(LlzHeader, Vec<LlzRecord>), LlzError> {
    let mut reader = LlzReader::open(path)?;
    let mut records = Vec::with_capacity(reader.record_count() as usize);
    while let Some(record) = reader.read_record()? {
        records.push(record);
    }
    Ok((reader.header, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::DepthUnits;
    use crate::writer::LlzWriter;
    use std::io::Cursor;

    fn sample_file(count: usize) -> Vec<u8> {
        let header = LlzHeader::new("reader", true, DepthUnits::Meters);
        let mut writer = LlzWriter::new(Vec::new(), header).unwrap();
        for i in 0..count {
            let record = LlzRecord::new(i as f64, 0.5, i as f32).with_time(i as i64, 0);
            writer.append(&record).unwrap();
        }
        writer.into_inner().unwrap()
    }

    fn reader_for(bytes: Vec<u8>) -> Result<LlzReader<Cursor<Vec<u8>>>, LlzError> {
        let len = bytes.len() as u64;
        LlzReader::new(Cursor::new(bytes), len)
    }

    #[test]
    fn test_reads_records_in_order() {
        let mut reader = reader_for(sample_file(4)).unwrap();
        assert_eq!(reader.record_count(), 4);
        assert!(reader.header().time_flag);

        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        let lats: Vec<f64> = records.iter().map(|r| r.lat).collect();
        assert_eq!(lats, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(records[3].tv_sec, 3);

        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let mut reader = reader_for(sample_file(0)).unwrap();
        assert_eq!(reader.record_count(), 0);
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_is_rejected() {
        let mut bytes = sample_file(2);
        bytes.truncate(bytes.len() - 5);
        assert!(matches!(
            reader_for(bytes),
            Err(LlzError::TruncatedRecord { trailing_bytes: 35 })
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let bytes = vec![0xAB; LlzHeader::SIZE];
        assert!(matches!(reader_for(bytes), Err(LlzError::BadMagic(_))));
    }
}
