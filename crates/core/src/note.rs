//! Typed view of one CSV row

use crate::week::{parse_timestamp_millis, week_label, week_start};
use chrono::{DateTime, NaiveDate, Utc};
use notescope_filters::parse_flag;
use notescope_formats::schema::{
    CREATED_AT, IS_HATEFUL, IS_POLITICAL, KEYWORDS, LANGUAGE, SENTIMENT, SUMMARY,
};
use notescope_formats::{Record, Schema};

/// One annotated note with coerced fields and its derived week.
///
/// Every field is `None` when the column is absent, the cell is empty,
/// or the value fails coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Raw row, kept for export
    pub record: Record,
    pub created_at: Option<DateTime<Utc>>,
    pub week: Option<NaiveDate>,
    pub language: Option<String>,
    pub sentiment: Option<String>,
    pub is_political: Option<bool>,
    pub is_hateful: Option<bool>,
    pub summary: Option<String>,
    pub keywords: Option<String>,
    /// `tweetId`, else `noteId`
    pub identifier: Option<String>,
}

impl Note {
    /// Coerce a raw record against the schema
    pub fn from_record(record: Record, schema: &Schema) -> Self {
        let cell = |name: &str| schema.column(name).and_then(|i| record.get(i));
        let text = |name: &str| cell(name).map(str::to_string);

        let created_at = cell(CREATED_AT).and_then(parse_timestamp_millis);
        let week = created_at.and_then(week_start);
        let language = text(LANGUAGE);
        let sentiment = text(SENTIMENT);
        let is_political = cell(IS_POLITICAL).and_then(parse_flag);
        let is_hateful = cell(IS_HATEFUL).and_then(parse_flag);
        let summary = text(SUMMARY);
        let keywords = text(KEYWORDS);
        let identifier = schema
            .identifier_column()
            .and_then(|i| record.get(i))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Self {
            record,
            created_at,
            week,
            language,
            sentiment,
            is_political,
            is_hateful,
            summary,
            keywords,
            identifier,
        }
    }

    pub fn week_label(&self) -> Option<String> {
        self.week.map(week_label)
    }

    /// Trimmed, non-empty tokens of `political_keywords_flagged`
    pub fn keyword_tokens(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .as_deref()
            .into_iter()
            .flat_map(|kw| kw.split(','))
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(headers: &[&str], values: &[&str]) -> Note {
        let schema = Schema::new(headers.iter().map(|h| h.to_string()).collect());
        let record = Record::new(values.iter().map(|v| v.to_string()).collect(), 2);
        Note::from_record(record, &schema)
    }

    #[test]
    fn test_full_row() {
        let n = note(
            &[
                "tweetId",
                "createdAtMillis",
                "detected_language",
                "sentiment_category",
                "is_political",
                "is_hateful",
                "summary_en",
                "political_keywords_flagged",
            ],
            &["42", "1704240000000", "hi", "negative", "True", "False", "a claim", "tax, reform"],
        );

        assert_eq!(n.identifier.as_deref(), Some("42"));
        assert_eq!(n.week_label().as_deref(), Some("2024-01-01"));
        assert_eq!(n.language.as_deref(), Some("hi"));
        assert_eq!(n.sentiment.as_deref(), Some("negative"));
        assert_eq!(n.is_political, Some(true));
        assert_eq!(n.is_hateful, Some(false));
        assert_eq!(n.summary.as_deref(), Some("a claim"));
        assert_eq!(n.keyword_tokens().collect::<Vec<_>>(), vec!["tax", "reform"]);
    }

    #[test]
    fn test_malformed_timestamp_gives_missing_week() {
        let n = note(&["createdAtMillis"], &["not_a_number"]);
        assert!(n.created_at.is_none());
        assert!(n.week.is_none());
        assert!(n.week_label().is_none());
    }

    #[test]
    fn test_absent_columns_are_missing() {
        let n = note(&["summary_en"], &["text"]);
        assert!(n.language.is_none());
        assert!(n.week.is_none());
        assert!(n.identifier.is_none());
        assert_eq!(n.keyword_tokens().count(), 0);
    }

    #[test]
    fn test_empty_keyword_tokens_discarded() {
        let n = note(&["political_keywords_flagged"], &[" , tax,, ,jobs "]);
        assert_eq!(n.keyword_tokens().collect::<Vec<_>>(), vec!["tax", "jobs"]);
    }

    #[test]
    fn test_unparsable_flag_is_missing() {
        let n = note(&["is_political"], &["unknown"]);
        assert!(n.is_political.is_none());
    }
}
