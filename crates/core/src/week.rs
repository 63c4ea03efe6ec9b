//! Timestamp coercion and week bucketing

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// Display and export format of a week label
pub const WEEK_FORMAT: &str = "%Y-%m-%d";

/// Parse a millisecond epoch timestamp, `None` for anything non-numeric.
///
/// Accepts integers and floats (`1.7e12`); the fractional millisecond is dropped.
pub fn parse_timestamp_millis(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let millis = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().ok()?;
            if !f.is_finite() || f.abs() >= i64::MAX as f64 {
                return None;
            }
            f.trunc() as i64
        }
    };
    DateTime::from_timestamp_millis(millis)
}

/// Monday on or before the timestamp's UTC date
pub fn week_start(timestamp: DateTime<Utc>) -> Option<NaiveDate> {
    let date = timestamp.date_naive();
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back))
}

pub fn week_label(week: NaiveDate) -> String {
    week.format(WEEK_FORMAT).to_string()
}

/// Parse a week label; only the canonical `YYYY-MM-DD` spelling is accepted
pub fn parse_week_label(label: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(label, WEEK_FORMAT).ok()?;
    (week_label(date) == label).then_some(date)
}
