//! Single-value selectors: `All` or one exact value
//!
//! Selectors parse from and print to the same strings the UI shows,
//! so config files and command-line flags use one spelling.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Sentiment values offered by the sentiment selector
pub const SENTIMENT_OPTIONS: [&str; 3] = ["positive", "neutral", "negative"];

/// Spelling of the "no constraint" option
pub(crate) const ALL: &str = "All";

/// Best-effort boolean coercion for flag cells and flag selectors
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// A value a [`Selector`] can hold
pub trait SelectorValue: Sized + PartialEq + fmt::Display {
    fn parse_value(raw: &str) -> Result<Self>;
}

impl SelectorValue for String {
    fn parse_value(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

impl SelectorValue for bool {
    fn parse_value(raw: &str) -> Result<Self> {
        parse_flag(raw).ok_or_else(|| Error::InvalidConfig(format!("not a boolean: {:?}", raw)))
    }
}

/// `All` imposes no constraint; `Only(v)` requires exact equality with `v`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// Test a stored value. A missing value only passes `All`.
    pub fn matches<Q>(&self, value: Option<&Q>) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => value.is_some_and(|v| wanted.borrow() == v),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(ALL),
            Selector::Only(v) => write!(f, "{}", v),
        }
    }
}

impl<T: SelectorValue> FromStr for Selector<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(Selector::All);
        }
        T::parse_value(s).map(Selector::Only)
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: SelectorValue> Deserialize<'de> for Selector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSelector::deserialize(deserializer)?;
        raw.into_string().parse().map_err(serde::de::Error::custom)
    }
}

/// Config files may spell flags as bare booleans and weeks as bare TOML dates
#[derive(Deserialize)]
#[serde(untagged, expecting = "\"All\", a boolean, a string, or a YYYY-MM-DD week")]
pub(crate) enum RawSelector {
    Bool(bool),
    Text(String),
    Date(toml::value::Datetime),
}

impl RawSelector {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawSelector::Bool(b) => b.to_string(),
            RawSelector::Text(s) => s,
            RawSelector::Date(d) => d.to_string(),
        }
    }
}
