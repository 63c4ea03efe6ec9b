//! Filter pipeline and view computation
//!
//! `compute_view` is a pure function of a dataset and the current
//! criteria. Shells call it again on every interaction; nothing is
//! cached between calls.

use crate::aggregate::Aggregates;
use crate::dataset::Dataset;
use crate::note::Note;
use crate::paginate::{total_pages, Page};
use crate::week::parse_week_label;
use crate::Result;
use chrono::NaiveDate;
use notescope_filters::{FilterCriteria, KeywordFilter, Selector};
use notescope_formats::{Capabilities, CsvExportWriter};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Week criterion resolved against the derived week column
#[derive(Debug, Clone, Copy)]
enum WeekTarget {
    Any,
    Week(NaiveDate),
    /// Selection is not a valid week label, so nothing matches
    Nothing,
}

/// Criteria compiled against one schema
struct Matcher<'c> {
    caps: Capabilities,
    criteria: &'c FilterCriteria,
    keyword: KeywordFilter,
    week: WeekTarget,
}

impl<'c> Matcher<'c> {
    fn new(caps: Capabilities, criteria: &'c FilterCriteria) -> Self {
        let week = match &criteria.week {
            Selector::All => WeekTarget::Any,
            Selector::Only(label) => match parse_week_label(label) {
                Some(date) => WeekTarget::Week(date),
                None => {
                    debug!("Week selection {:?} is not a week label; no rows match", label);
                    WeekTarget::Nothing
                }
            },
        };

        Self {
            caps,
            criteria,
            keyword: criteria.keyword_filter(),
            week,
        }
    }

    /// A criterion whose column is absent is skipped
    fn matches(&self, note: &Note) -> bool {
        let c = self.criteria;
        let caps = &self.caps;

        (!caps.language || c.language.matches(note.language.as_deref()))
            && (!caps.sentiment || c.sentiment.matches::<str>(note.sentiment.as_deref()))
            && (!caps.week() || self.matches_week(note.week))
            && (!caps.political || c.is_political.matches(note.is_political.as_ref()))
            && (!caps.hateful || c.is_hateful.matches(note.is_hateful.as_ref()))
            && (!caps.summary || self.keyword.matches(note.summary.as_deref()))
    }

    fn matches_week(&self, week: Option<NaiveDate>) -> bool {
        match self.week {
            WeekTarget::Any => true,
            WeekTarget::Week(wanted) => week == Some(wanted),
            WeekTarget::Nothing => false,
        }
    }
}

/// Rows of a dataset that passed the criteria, in original order
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a Dataset,
    notes: Vec<&'a Note>,
}

impl<'a> Subset<'a> {
    /// Every row of the dataset
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            notes: dataset.notes().iter().collect(),
        }
    }

    /// Keep the rows of this subset that satisfy `criteria`
    pub fn refine(&self, criteria: &FilterCriteria) -> Subset<'a> {
        let matcher = Matcher::new(*self.dataset.capabilities(), criteria);
        Self {
            dataset: self.dataset,
            notes: self
                .notes
                .iter()
                .copied()
                .filter(|n| matcher.matches(n))
                .collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn notes(&self) -> &[&'a Note] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Note> + '_ {
        self.notes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.notes.len())
    }

    /// 1-based page with links attached when the dataset has an identifier column
    pub fn page(&self, number: usize) -> Page<'a> {
        let links = self.dataset.capabilities().identifier.is_some();
        Page::new(&self.notes, number, links)
    }

    /// Rows carrying an identifier, `None` without an identifier column
    pub fn identifier_count(&self) -> Option<usize> {
        self.dataset.capabilities().identifier?;
        Some(self.notes.iter().filter(|n| n.identifier.is_some()).count())
    }

    /// Write the subset as CSV with the input's header order plus `week`
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<W> {
        let mut writer = CsvExportWriter::new(sink, self.dataset.schema())?;
        self.write_rows(&mut writer)?;
        Ok(writer.finish()?)
    }

    /// Export to a file; returns the number of rows written
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let mut writer = CsvExportWriter::create(path, self.dataset.schema())?;
        self.write_rows(&mut writer)?;
        let written = writer.rows_written();
        writer.finish()?;
        Ok(written)
    }

    fn write_rows<W: Write>(&self, writer: &mut CsvExportWriter<W>) -> Result<()> {
        for note in &self.notes {
            writer.write_record(&note.record, note.week_label().as_deref())?;
        }
        Ok(())
    }
}

/// Filter a dataset from scratch
pub fn filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Subset<'a> {
    let matcher = Matcher::new(*dataset.capabilities(), criteria);
    Subset {
        dataset,
        notes: dataset.notes().iter().filter(|n| matcher.matches(n)).collect(),
    }
}

/// Scalar counts shown beside the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    /// Filtered rows with a tweet/note id; `None` without an identifier column
    pub identifier_count: Option<usize>,
    /// India composite over the full dataset; `None` without a language column
    pub india_count: Option<usize>,
}

impl Summary {
    pub fn filter_rate(&self) -> f64 {
        if self.total_rows > 0 {
            ((self.total_rows - self.filtered_rows) as f64 / self.total_rows as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn retention_rate(&self) -> f64 {
        if self.total_rows > 0 {
            (self.filtered_rows as f64 / self.total_rows as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Everything the rendering layer needs for one interaction
#[derive(Debug, Clone)]
pub struct ViewResult<'a> {
    pub subset: Subset<'a>,
    pub aggregates: Aggregates,
    pub summary: Summary,
}

impl<'a> ViewResult<'a> {
    pub fn page(&self, number: usize) -> Page<'a> {
        self.subset.page(number)
    }
}

/// Filter the dataset and compute aggregates and summary counts
pub fn compute_view<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> ViewResult<'a> {
    let subset = filter(dataset, criteria);
    let aggregates = Aggregates::compute(dataset);
    let summary = Summary {
        total_rows: dataset.len(),
        filtered_rows: subset.len(),
        identifier_count: subset.identifier_count(),
        india_count: aggregates.india_count,
    };

    debug!(
        "View: {} of {} rows ({:.1}%)",
        summary.filtered_rows,
        summary.total_rows,
        summary.retention_rate()
    );

    ViewResult {
        subset,
        aggregates,
        summary,
    }
}
