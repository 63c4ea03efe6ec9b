//! Language selection
//!
//! Supports a single language code, every language, or the composite
//! India group of Hindi, Tamil, Urdu and Marathi.

use crate::selector::{RawSelector, ALL};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Language codes in the India composite (ISO 639-1)
pub const INDIA_LANGUAGES: [&str; 4] = ["hi", "ta", "ur", "mr"];

/// Label shown for the India composite
pub const INDIA_LABEL: &str = "India (hi+ta+ur+mr)";

/// Whether `code` belongs to the India composite
pub fn is_india_language(code: &str) -> bool {
    INDIA_LANGUAGES.contains(&code)
}

/// Language filter choice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageSelector {
    #[default]
    All,
    India,
    Code(String),
}

impl LanguageSelector {
    pub fn is_all(&self) -> bool {
        matches!(self, LanguageSelector::All)
    }

    /// Test a `detected_language` value. A missing value only passes `All`.
    pub fn matches(&self, language: Option<&str>) -> bool {
        match self {
            LanguageSelector::All => true,
            LanguageSelector::India => language.is_some_and(is_india_language),
            LanguageSelector::Code(code) => language == Some(code.as_str()),
        }
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelector::All => f.write_str(ALL),
            LanguageSelector::India => f.write_str(INDIA_LABEL),
            LanguageSelector::Code(code) => f.write_str(code),
        }
    }
}

impl FromStr for LanguageSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            Ok(LanguageSelector::All)
        } else if s.eq_ignore_ascii_case("india") || s == INDIA_LABEL {
            Ok(LanguageSelector::India)
        } else if s.contains(char::is_whitespace) {
            Err(Error::InvalidConfig(format!("not a language code: {:?}", s)))
        } else {
            Ok(LanguageSelector::Code(s.to_string()))
        }
    }
}

impl Serialize for LanguageSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // Short spelling keeps config files readable
            LanguageSelector::India => serializer.serialize_str("India"),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for LanguageSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSelector::deserialize(deserializer)?;
        raw.into_string().parse().map_err(serde::de::Error::custom)
    }
}
