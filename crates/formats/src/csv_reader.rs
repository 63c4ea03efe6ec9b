//! Streaming CSV reader
//!
//! Reads delimited text row by row with automatic gzip decompression.
//! Cells are kept verbatim; type coercion happens in the pipeline.

use crate::{Error, Record, Result, Schema};
use csv::{ByteRecord, ReaderBuilder};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for the CSV reader
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Buffer size for the underlying reader
    pub buffer_size: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }
}

impl CsvConfig {
    /// Tab-separated values
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }
}

/// Streaming CSV reader yielding one `Record` per data row
pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    records_read: usize,
    rows_skipped: usize,
    total_bytes: Option<u64>,
}

impl CsvReader<Box<dyn Read>> {
    /// Open a CSV file, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, CsvConfig::default())
    }

    /// Open a delimited file with a custom configuration
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => {
                debug!("Opening gzip-compressed file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
                // Decompressed size is unknown up front
                Self::new_with_config(reader, config, None)
            }
            _ => {
                debug!("Opening plain file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(file);
                Self::new_with_config(reader, config, Some(total_bytes))
            }
        }
    }
}

impl<R: Read> CsvReader<R> {
    /// Create a new CSV reader from any Read source; reads the header row immediately
    pub fn new(reader: R) -> Result<Self> {
        Self::new_with_config(reader, CsvConfig::default(), None)
    }

    /// Create a new CSV reader with custom configuration
    pub fn new_with_config(reader: R, config: CsvConfig, total_bytes: Option<u64>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .buffer_capacity(config.buffer_size)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        // Kept verbatim: export reproduces them and column lookup is exact
        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) && !headers.is_empty() {
            return Err(Error::InvalidFile("header row has no column names".to_string()));
        }

        debug!("CSV header: {} columns", headers.len());

        Ok(Self {
            reader,
            headers,
            records_read: 0,
            rows_skipped: 0,
            total_bytes,
        })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Capability set for this file's columns
    pub fn schema(&self) -> Schema {
        Schema::new(self.headers.clone())
    }

    /// Number of data rows returned so far
    pub fn records_processed(&self) -> usize {
        self.records_read
    }

    /// Number of malformed rows skipped so far
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// Bytes consumed from the underlying source
    pub fn bytes_processed(&self) -> u64 {
        self.reader.position().byte()
    }

    /// Total file size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = ByteRecord::new();

        loop {
            match self.reader.read_byte_record(&mut row) {
                Ok(false) => return None, // EOF
                Ok(true) => {
                    let line = row.position().map(|p| p.line() as usize).unwrap_or(0);

                    // Blank lines come back as a single empty field
                    if row.len() == 1 && row[0].is_empty() && self.headers.len() > 1 {
                        continue;
                    }

                    if row.len() > self.headers.len() {
                        warn!(
                            "Skipping line {}: expected {} fields, found {}",
                            line,
                            self.headers.len(),
                            row.len()
                        );
                        self.rows_skipped += 1;
                        continue;
                    }

                    // Short rows are padded with missing values
                    let mut values: Vec<String> = row
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect();
                    values.resize(self.headers.len(), String::new());

                    self.records_read += 1;
                    return Some(Ok(Record::new(values, line)));
                }
                Err(e) => {
                    if e.is_io_error() {
                        return Some(Err(Error::Csv(e)));
                    }
                    warn!("Skipping malformed CSV row: {}", e);
                    self.rows_skipped += 1;
                    continue;
                }
            }
        }
    }
}
