//! File format readers and writers for community notes datasets
//!
//! This crate provides a streaming CSV reader with gzip support, the
//! column capability set consulted by the pipeline, and the CSV writer
//! used to export a filtered subset.

pub mod csv_reader;
pub mod error;
pub mod reader;
pub mod record;
pub mod schema;
pub mod writer;

pub use csv_reader::CsvReader;
pub use error::{Error, Result};
pub use reader::{open_dataset, DatasetReader};
pub use record::Record;
pub use schema::{Capabilities, IdColumn, Schema, WeekPlacement};
pub use writer::CsvExportWriter;
