//! CSV export writer
//!
//! Writes a subset of records back out with the input's header order.
//! The derived week column is appended, or overwrites an existing
//! `week` column in place.

use crate::{Error, Record, Result, Schema, WeekPlacement};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Streaming CSV writer for filtered exports.
///
/// The header row is written on construction. Call `finish()` to flush.
pub struct CsvExportWriter<W: Write> {
    writer: csv::Writer<W>,
    placement: WeekPlacement,
    rows_written: usize,
}

impl CsvExportWriter<File> {
    /// Create `path` and write the header row
    pub fn create<P: AsRef<Path>>(path: P, schema: &Schema) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(file, schema)
    }
}

impl<W: Write> CsvExportWriter<W> {
    /// Wrap any Write sink and write the header row
    pub fn new(inner: W, schema: &Schema) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        let headers = schema.export_headers();
        if !headers.is_empty() {
            writer.write_record(&headers)?;
        }

        Ok(Self {
            writer,
            placement: schema.week_placement(),
            rows_written: 0,
        })
    }

    /// Write one record; `week` is the derived week label, `None` when missing
    pub fn write_record(&mut self, record: &Record, week: Option<&str>) -> Result<()> {
        let week = week.unwrap_or("");
        match self.placement {
            WeekPlacement::Absent => self.writer.write_record(&record.values)?,
            WeekPlacement::Append => self
                .writer
                .write_record(record.values.iter().map(String::as_str).chain([week]))?,
            WeekPlacement::Replace(index) => self.writer.write_record(
                record
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| if i == index { week } else { v.as_str() }),
            )?,
        }
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying sink
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| {
            Error::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}
