//! Summary tables over the full dataset
//!
//! Each table is `None` in [`Aggregates`] when the column it needs is
//! absent, which the rendering layer treats as "chart unavailable".

use crate::dataset::Dataset;
use crate::note::Note;
use chrono::NaiveDate;
use notescope_filters::language::is_india_language;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of entries in the keyword chart
pub const TOP_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCount {
    pub week: NaiveDate,
    pub count: usize,
}

/// Week × sentiment pivot; `counts[i]` lines up with `sentiments[i]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTable {
    pub sentiments: Vec<String>,
    pub rows: Vec<SentimentRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentRow {
    pub week: NaiveDate,
    pub counts: Vec<usize>,
}

impl SentimentRow {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// All chart tables for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub notes_per_week: Option<Vec<WeekCount>>,
    pub sentiment_per_week: Option<SentimentTable>,
    pub languages: Option<Vec<LanguageCount>>,
    pub top_keywords: Option<Vec<KeywordCount>>,
    pub india_count: Option<usize>,
}

impl Aggregates {
    /// Compute every table the dataset's columns allow
    pub fn compute(dataset: &Dataset) -> Self {
        let caps = dataset.capabilities();
        let notes = dataset.notes();

        Self {
            notes_per_week: caps.week().then(|| notes_per_week(notes)),
            sentiment_per_week: (caps.week() && caps.sentiment)
                .then(|| sentiment_per_week(notes)),
            languages: caps.language.then(|| language_breakdown(notes)),
            top_keywords: caps.keywords.then(|| top_keywords(notes, TOP_KEYWORDS)),
            india_count: caps.language.then(|| india_count(notes)),
        }
    }
}

/// Row count per week, oldest first; rows without a week are ignored
pub fn notes_per_week(notes: &[Note]) -> Vec<WeekCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for week in notes.iter().filter_map(|n| n.week) {
        *counts.entry(week).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(week, count)| WeekCount { week, count })
        .collect()
}

/// Row count per (week, sentiment), pivoted with sentiments as sorted columns.
///
/// Rows missing either the week or the sentiment are not counted.
pub fn sentiment_per_week(notes: &[Note]) -> SentimentTable {
    let mut counts: BTreeMap<NaiveDate, HashMap<&str, usize>> = BTreeMap::new();
    let mut sentiments: BTreeSet<&str> = BTreeSet::new();

    for note in notes {
        if let (Some(week), Some(sentiment)) = (note.week, note.sentiment.as_deref()) {
            sentiments.insert(sentiment);
            *counts.entry(week).or_default().entry(sentiment).or_default() += 1;
        }
    }

    let rows = counts
        .into_iter()
        .map(|(week, by_sentiment)| SentimentRow {
            week,
            counts: sentiments
                .iter()
                .map(|s| by_sentiment.get(s).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    SentimentTable {
        sentiments: sentiments.into_iter().map(str::to_string).collect(),
        rows,
    }
}

/// Row count per language, most frequent first
pub fn language_breakdown(notes: &[Note]) -> Vec<LanguageCount> {
    ranked(notes.iter().filter_map(|n| n.language.as_deref()))
        .into_iter()
        .map(|(language, count)| LanguageCount { language, count })
        .collect()
}

/// The `limit` most frequent flagged keywords across all rows
pub fn top_keywords(notes: &[Note], limit: usize) -> Vec<KeywordCount> {
    let mut ranked = ranked(notes.iter().flat_map(Note::keyword_tokens));
    ranked.truncate(limit);
    ranked
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect()
}

/// Rows whose language is in the India composite
pub fn india_count(notes: &[Note]) -> usize {
    notes
        .iter()
        .filter(|n| n.language.as_deref().is_some_and(is_india_language))
        .count()
}

/// Frequency count sorted descending; ties keep first-seen order
fn ranked<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in values {
        match index.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().map(|(v, c)| (v.to_string(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notescope_formats::CsvReader;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(CsvReader::new(csv.as_bytes()).unwrap()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesdays in consecutive weeks starting 2024-01-01 and 2024-01-08
    const W1: &str = "1704240000000";
    const W2: &str = "1704844800000";

    #[test]
    fn test_notes_per_week_chronological() {
        let csv = format!("createdAtMillis\n{W2}\n{W1}\n{W2}\nnot_a_number\n");
        let ds = dataset(&csv);

        let weeks = notes_per_week(ds.notes());
        assert_eq!(
            weeks,
            vec![
                WeekCount { week: date(2024, 1, 1), count: 1 },
                WeekCount { week: date(2024, 1, 8), count: 2 },
            ]
        );
    }

    #[test]
    fn test_sentiment_pivot_fills_zeros() {
        let csv = format!(
            "createdAtMillis,sentiment_category\n\
             {W1},positive\n{W1},negative\n{W1},negative\n{W2},neutral\n"
        );
        let ds = dataset(&csv);

        let table = sentiment_per_week(ds.notes());
        assert_eq!(table.sentiments, vec!["negative", "neutral", "positive"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].week, date(2024, 1, 1));
        assert_eq!(table.rows[0].counts, vec![2, 0, 1]);
        assert_eq!(table.rows[1].counts, vec![0, 1, 0]);
    }

    #[test]
    fn test_sentiment_rows_sum_to_weekly_counts() {
        let csv = format!(
            "createdAtMillis,sentiment_category\n\
             {W1},positive\n{W2},negative\n{W1},neutral\n{W2},negative\n{W1},positive\n"
        );
        let ds = dataset(&csv);

        let weekly = notes_per_week(ds.notes());
        let table = sentiment_per_week(ds.notes());
        assert_eq!(weekly.len(), table.rows.len());
        for (w, row) in weekly.iter().zip(&table.rows) {
            assert_eq!(w.week, row.week);
            assert_eq!(w.count, row.total());
        }
    }

    #[test]
    fn test_language_breakdown_descending() {
        let ds = dataset("detected_language\nen\nhi\nen\nta\nhi\nen\n\n");

        let langs = language_breakdown(ds.notes());
        let pairs: Vec<_> = langs.iter().map(|l| (l.language.as_str(), l.count)).collect();
        assert_eq!(pairs, vec![("en", 3), ("hi", 2), ("ta", 1)]);
    }

    #[test]
    fn test_top_keywords_example() {
        let ds = dataset("political_keywords_flagged\n\"tax, reform\"\n\"tax,jobs\"\n");

        let top = top_keywords(ds.notes(), TOP_KEYWORDS);
        let pairs: Vec<_> = top.iter().map(|k| (k.keyword.as_str(), k.count)).collect();
        assert_eq!(pairs, vec![("tax", 2), ("reform", 1), ("jobs", 1)]);
    }

    #[test]
    fn test_top_keywords_limit_and_recount() {
        let mut csv = String::from("political_keywords_flagged\n");
        for i in 0..15 {
            // keyword kN appears N+1 times overall
            for _ in 0..=i {
                csv.push_str(&format!("k{i}\n"));
            }
        }
        csv.push_str("\" , ,\"\n");
        let ds = dataset(&csv);

        let top = top_keywords(ds.notes(), TOP_KEYWORDS);
        assert_eq!(top.len(), TOP_KEYWORDS);
        assert_eq!(top[0].keyword, "k14");
        for pair in top.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        for entry in &top {
            let recount = ds
                .notes()
                .iter()
                .flat_map(Note::keyword_tokens)
                .filter(|k| *k == entry.keyword)
                .count();
            assert_eq!(entry.count, recount);
        }
    }

    #[test]
    fn test_ranked_ties_first_seen() {
        let ranked = ranked(["b", "a", "c", "a", "b"].into_iter());
        assert_eq!(
            ranked,
            vec![("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn test_india_count() {
        let ds = dataset("detected_language\nhi\nen\nta\n");
        assert_eq!(india_count(ds.notes()), 2);
    }

    #[test]
    fn test_compute_respects_capabilities() {
        let ds = dataset("detected_language\nhi\n");
        let agg = Aggregates::compute(&ds);

        assert!(agg.notes_per_week.is_none());
        assert!(agg.sentiment_per_week.is_none());
        assert!(agg.top_keywords.is_none());
        assert_eq!(agg.india_count, Some(1));
        assert_eq!(agg.languages.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_dataset_gives_empty_tables() {
        let ds = dataset(
            "createdAtMillis,sentiment_category,detected_language,political_keywords_flagged\n",
        );
        let agg = Aggregates::compute(&ds);

        assert_eq!(agg.notes_per_week, Some(vec![]));
        assert_eq!(agg.sentiment_per_week, Some(SentimentTable::default()));
        assert_eq!(agg.languages, Some(vec![]));
        assert_eq!(agg.top_keywords, Some(vec![]));
        assert_eq!(agg.india_count, Some(0));
    }
}
