//! The full set of sidebar selections

use crate::{KeywordFilter, LanguageSelector, Selector};
use serde::{Deserialize, Serialize};

/// Current filter selections plus keyword text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub language: LanguageSelector,
    pub sentiment: Selector<String>,
    /// Week start label, `YYYY-MM-DD`
    pub week: Selector<String>,
    pub is_political: Selector<bool>,
    pub is_hateful: Selector<bool>,
    /// Substring searched in `summary_en`
    pub keyword: String,
}

impl FilterCriteria {
    /// True when every selector is `All` and the keyword is empty
    pub fn is_unfiltered(&self) -> bool {
        self.language.is_all()
            && self.sentiment.is_all()
            && self.week.is_all()
            && self.is_political.is_all()
            && self.is_hateful.is_all()
            && self.keyword.is_empty()
    }

    pub fn keyword_filter(&self) -> KeywordFilter {
        KeywordFilter::new(&self.keyword)
    }

    /// Overlay the non-`None` fields of `other` onto `self`
    pub fn merge(mut self, other: CriteriaOverrides) -> Self {
        if let Some(v) = other.language {
            self.language = v;
        }
        if let Some(v) = other.sentiment {
            self.sentiment = v;
        }
        if let Some(v) = other.week {
            self.week = v;
        }
        if let Some(v) = other.is_political {
            self.is_political = v;
        }
        if let Some(v) = other.is_hateful {
            self.is_hateful = v;
        }
        if let Some(v) = other.keyword {
            self.keyword = v;
        }
        self
    }
}

/// Partial criteria, e.g. from command-line flags layered over a config file
#[derive(Debug, Clone, Default)]
pub struct CriteriaOverrides {
    pub language: Option<LanguageSelector>,
    pub sentiment: Option<Selector<String>>,
    pub week: Option<Selector<String>>,
    pub is_political: Option<Selector<bool>>,
    pub is_hateful: Option<Selector<bool>>,
    pub keyword: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfiltered() {
        assert!(FilterCriteria::default().is_unfiltered());
    }

    #[test]
    fn test_keyword_makes_filtered() {
        let c = FilterCriteria {
            keyword: "tax".to_string(),
            ..Default::default()
        };
        assert!(!c.is_unfiltered());
        assert!(c.keyword_filter().is_active());
    }

    #[test]
    fn test_merge_overrides() {
        let base = FilterCriteria {
            language: LanguageSelector::India,
            keyword: "vote".to_string(),
            ..Default::default()
        };
        let merged = base.merge(CriteriaOverrides {
            is_political: Some(Selector::Only(true)),
            keyword: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(merged.language, LanguageSelector::India);
        assert_eq!(merged.is_political, Selector::Only(true));
        assert!(merged.keyword.is_empty());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = "language: India\nsentiment: negative\nis_political: true\nkeyword: tax\n";
        let c: FilterCriteria = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(c.language, LanguageSelector::India);
        assert_eq!(c.sentiment, Selector::Only("negative".to_string()));
        assert_eq!(c.is_political, Selector::Only(true));
        assert!(c.is_hateful.is_all());
        assert!(c.week.is_all());
        assert_eq!(c.keyword, "tax");

        let back: FilterCriteria = serde_yaml::from_str(&serde_yaml::to_string(&c).unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_toml_flags_as_strings() {
        let text = "is_hateful = \"False\"\nweek = \"2024-01-01\"\n";
        let c: FilterCriteria = toml::from_str(text).unwrap();

        assert_eq!(c.is_hateful, Selector::Only(false));
        assert_eq!(c.week, Selector::Only("2024-01-01".to_string()));
    }

    #[test]
    fn test_toml_bare_date_week() {
        let c: FilterCriteria = toml::from_str("week = 2024-01-01\n").unwrap();
        assert_eq!(c.week, Selector::Only("2024-01-01".to_string()));
    }

    #[test]
    fn test_unexpected_selector_type_names_spelling() {
        let err = toml::from_str::<FilterCriteria>("week = [1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"), "{err}");
    }

    #[test]
    fn test_invalid_flag_in_config() {
        let result: std::result::Result<FilterCriteria, _> = serde_yaml::from_str("is_hateful: sometimes\n");
        assert!(result.is_err());
    }
}
