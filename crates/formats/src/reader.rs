//! Dataset opening with format detection
//!
//! Picks the delimiter and decompression from the file extension.

use crate::csv_reader::{CsvConfig, CsvReader};
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reader returned by [`open_dataset`]
pub type DatasetReader = CsvReader<Box<dyn Read>>;

/// Factory function to open a dataset with automatic format detection
///
/// Supported formats:
/// - `.csv` - comma-separated values
/// - `.tsv` - tab-separated values
/// - `.gz` - gzip-compressed CSV, or TSV when named `*.tsv.gz`
pub fn open_dataset<P: AsRef<Path>>(path: P) -> Result<DatasetReader> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedFormat("No file extension found".to_string()))?;

    info!("Opening dataset: {:?} (format: {})", path, extension);

    match extension {
        "csv" => CsvReader::open_with_config(path, CsvConfig::default()),
        "tsv" => CsvReader::open_with_config(path, CsvConfig::tsv()),
        "gz" => {
            let inner = path
                .file_stem()
                .map(Path::new)
                .and_then(|stem| stem.extension())
                .and_then(|e| e.to_str());
            let config = match inner {
                Some("tsv") => CsvConfig::tsv(),
                _ => CsvConfig::default(),
            };
            CsvReader::open_with_config(path, config)
        }
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported file extension: {}",
            extension
        ))),
    }
}
