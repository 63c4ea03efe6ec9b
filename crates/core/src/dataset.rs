//! Immutable in-memory dataset with derived columns
//!
//! Loading coerces every row once and derives the `week` column. The
//! resulting `Dataset` is never mutated; filtering produces borrowed
//! subsets.

use crate::note::Note;
use crate::week::week_label;
use crate::Result;
use notescope_filters::{LanguageSelector, SENTIMENT_OPTIONS};
use notescope_formats::{open_dataset, Capabilities, CsvReader, Record, Schema};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Rows between progress callbacks while loading
pub const PROGRESS_INTERVAL: usize = 1000;

/// Counters collected while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub rows: usize,
    /// Malformed CSV rows dropped by the reader
    pub skipped_rows: usize,
    /// Non-empty timestamps that failed numeric coercion
    pub invalid_timestamps: usize,
}

/// A loaded file: schema, typed notes and load counters
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    notes: Vec<Note>,
    stats: LoadStats,
}

impl Dataset {
    /// Open and load a dataset file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = open_dataset(path)?;
        Self::from_reader(reader)
    }

    /// Drain a CSV reader into a dataset
    pub fn from_reader<R: Read>(reader: CsvReader<R>) -> Result<Self> {
        Self::from_reader_with_progress(reader, |_| {})
    }

    /// Drain a CSV reader, calling `on_progress` every `PROGRESS_INTERVAL` rows
    /// and once more at the end
    pub fn from_reader_with_progress<R, F>(mut reader: CsvReader<R>, mut on_progress: F) -> Result<Self>
    where
        R: Read,
        F: FnMut(&CsvReader<R>),
    {
        let schema = reader.schema();
        let mut records = Vec::new();

        while let Some(result) = reader.next() {
            records.push(result?);
            if records.len() % PROGRESS_INTERVAL == 0 {
                on_progress(&reader);
            }
        }
        on_progress(&reader);

        let mut dataset = Self::derive(schema, records);
        dataset.stats.skipped_rows = reader.rows_skipped();
        Ok(dataset)
    }

    /// Coerce raw records and derive the week column
    pub fn derive(schema: Schema, records: Vec<Record>) -> Self {
        let timestamp_col = schema.column(notescope_formats::schema::CREATED_AT);

        let mut invalid_timestamps = 0;
        let notes: Vec<Note> = records
            .into_iter()
            .map(|record| {
                let note = Note::from_record(record, &schema);
                if note.created_at.is_none()
                    && timestamp_col.is_some_and(|i| note.record.get(i).is_some())
                {
                    invalid_timestamps += 1;
                }
                note
            })
            .collect();

        if invalid_timestamps > 0 {
            debug!(
                "{} of {} timestamps could not be parsed; their week is missing",
                invalid_timestamps,
                notes.len()
            );
        }
        info!(
            "Loaded {} notes ({} columns, week column: {})",
            notes.len(),
            schema.headers().len(),
            schema.capabilities().week()
        );

        let stats = LoadStats {
            rows: notes.len(),
            skipped_rows: 0,
            invalid_timestamps,
        };

        Self {
            schema,
            notes,
            stats,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.schema.capabilities()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn load_stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Values each filter can take for this dataset
    pub fn options(&self) -> FilterOptions {
        FilterOptions::for_dataset(self)
    }
}

/// Selectable values for each filter; a disabled filter offers only `All`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub languages: Vec<String>,
    pub sentiments: Vec<String>,
    pub weeks: Vec<String>,
    pub political: Vec<String>,
    pub hateful: Vec<String>,
}

impl FilterOptions {
    fn for_dataset(dataset: &Dataset) -> Self {
        let caps = dataset.capabilities();
        let all = || vec![LanguageSelector::All.to_string()];
        let flags = |enabled: bool| {
            let mut v = all();
            if enabled {
                v.extend(["true".to_string(), "false".to_string()]);
            }
            v
        };

        let mut languages = all();
        if caps.language {
            languages.push(LanguageSelector::India.to_string());
            let codes: BTreeSet<&str> = dataset
                .notes()
                .iter()
                .filter_map(|n| n.language.as_deref())
                .collect();
            languages.extend(codes.into_iter().map(str::to_string));
        }

        let mut sentiments = all();
        if caps.sentiment {
            sentiments.extend(SENTIMENT_OPTIONS.iter().map(|s| s.to_string()));
        }

        let mut weeks = all();
        if caps.week() {
            let distinct: BTreeSet<_> = dataset.notes().iter().filter_map(|n| n.week).collect();
            weeks.extend(distinct.into_iter().map(week_label));
        }

        Self {
            languages,
            sentiments,
            weeks,
            political: flags(caps.political),
            hateful: flags(caps.hateful),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(CsvReader::new(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_load_derives_week() {
        let ds = dataset("noteId,createdAtMillis\n1,1704240000000\n2,not_a_number\n3,\n");

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.notes()[0].week_label().as_deref(), Some("2024-01-01"));
        assert!(ds.notes()[1].week.is_none());
        assert!(ds.notes()[2].week.is_none());
        assert_eq!(ds.load_stats().invalid_timestamps, 1);
        assert!(ds.capabilities().week());
    }

    #[test]
    fn test_no_timestamp_column_disables_week() {
        let ds = dataset("noteId\n1\n");
        assert!(!ds.capabilities().week());
        assert_eq!(ds.options().weeks, vec!["All"]);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = dataset("noteId,detected_language\n");
        assert!(ds.is_empty());
        assert_eq!(ds.options().languages, vec!["All", "India (hi+ta+ur+mr)"]);
    }

    #[test]
    fn test_options() {
        let ds = dataset(
            "detected_language,sentiment_category,createdAtMillis,is_political\n\
             ta,positive,1704240000000,True\n\
             en,negative,1704844800000,False\n\
             ,neutral,1704240000000,\n",
        );
        let opts = ds.options();

        assert_eq!(opts.languages, vec!["All", "India (hi+ta+ur+mr)", "en", "ta"]);
        assert_eq!(opts.sentiments, vec!["All", "positive", "neutral", "negative"]);
        assert_eq!(opts.weeks, vec!["All", "2024-01-01", "2024-01-08"]);
        assert_eq!(opts.political, vec!["All", "true", "false"]);
        assert_eq!(opts.hateful, vec!["All"]);
    }

    #[test]
    fn test_progress_callback() {
        let mut csv = String::from("noteId\n");
        for i in 0..2500 {
            csv.push_str(&format!("{}\n", i));
        }
        let reader = CsvReader::new(csv.as_bytes()).unwrap();

        let mut seen = Vec::new();
        let ds = Dataset::from_reader_with_progress(reader, |r| seen.push(r.records_processed()))
            .unwrap();

        assert_eq!(ds.len(), 2500);
        assert_eq!(seen, vec![1000, 2000, 2500]);
    }

    #[test]
    fn test_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("csv");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "noteId,summary_en").unwrap();
            writeln!(file, "1,hello").unwrap();
            writeln!(file, "2,world,extra").unwrap();
        }

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.load_stats().skipped_rows, 1);

        std::fs::remove_file(path).unwrap();
    }
}
