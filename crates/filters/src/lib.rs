//! Filter criteria for community notes datasets
//!
//! This crate provides the selector types behind each sidebar filter
//! and the matchers that test a single field value against them.

pub mod criteria;
pub mod error;
pub mod keyword;
pub mod language;
pub mod selector;

pub use criteria::{CriteriaOverrides, FilterCriteria};
pub use error::{Error, Result};
pub use keyword::KeywordFilter;
pub use language::{LanguageSelector, INDIA_LANGUAGES};
pub use selector::{parse_flag, Selector, SelectorValue, SENTIMENT_OPTIONS};
