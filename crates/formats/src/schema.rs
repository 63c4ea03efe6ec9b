//! Column capability set for a loaded dataset
//!
//! Built once from the header row. The pipeline asks the schema which
//! optional columns exist instead of probing records on every call.

use std::collections::HashMap;

pub const CREATED_AT: &str = "createdAtMillis";
pub const LANGUAGE: &str = "detected_language";
pub const SENTIMENT: &str = "sentiment_category";
pub const IS_POLITICAL: &str = "is_political";
pub const IS_HATEFUL: &str = "is_hateful";
pub const SUMMARY: &str = "summary_en";
pub const KEYWORDS: &str = "political_keywords_flagged";
pub const TWEET_ID: &str = "tweetId";
pub const NOTE_ID: &str = "noteId";
pub const WEEK: &str = "week";

/// Identifier column used to build external links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdColumn {
    TweetId,
    NoteId,
}

impl IdColumn {
    pub fn name(&self) -> &'static str {
        match self {
            IdColumn::TweetId => TWEET_ID,
            IdColumn::NoteId => NOTE_ID,
        }
    }
}

/// Which optional columns are present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub timestamp: bool,
    pub language: bool,
    pub sentiment: bool,
    pub political: bool,
    pub hateful: bool,
    pub summary: bool,
    pub keywords: bool,
    /// `tweetId` when present, otherwise `noteId`
    pub identifier: Option<IdColumn>,
}

impl Capabilities {
    /// Week features follow the timestamp column
    pub fn week(&self) -> bool {
        self.timestamp
    }
}

/// Where the derived `week` column goes on export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekPlacement {
    /// No timestamp column, no week column
    Absent,
    /// Appended after the input columns
    Append,
    /// Input already had a `week` column at this index; overwritten in place
    Replace(usize),
}

/// Header row plus the capability set derived from it
#[derive(Debug, Clone)]
pub struct Schema {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    capabilities: Capabilities,
}

impl Schema {
    /// Build a schema from the header row. Duplicate headers resolve to their first occurrence.
    pub fn new(headers: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        let has = |name: &str| index.contains_key(name);
        let identifier = if has(TWEET_ID) {
            Some(IdColumn::TweetId)
        } else if has(NOTE_ID) {
            Some(IdColumn::NoteId)
        } else {
            None
        };

        let capabilities = Capabilities {
            timestamp: has(CREATED_AT),
            language: has(LANGUAGE),
            sentiment: has(SENTIMENT),
            political: has(IS_POLITICAL),
            hateful: has(IS_HATEFUL),
            summary: has(SUMMARY),
            keywords: has(KEYWORDS),
            identifier,
        };

        Self {
            headers,
            index,
            capabilities,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Index of a column by header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Index of the identifier column, if any
    pub fn identifier_column(&self) -> Option<usize> {
        self.capabilities
            .identifier
            .and_then(|id| self.column(id.name()))
    }

    pub fn week_placement(&self) -> WeekPlacement {
        if !self.capabilities.week() {
            return WeekPlacement::Absent;
        }
        match self.column(WEEK) {
            Some(i) => WeekPlacement::Replace(i),
            None => WeekPlacement::Append,
        }
    }

    /// Header row written on export
    pub fn export_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if self.week_placement() == WeekPlacement::Append {
            headers.push(WEEK.to_string());
        }
        headers
    }
}
