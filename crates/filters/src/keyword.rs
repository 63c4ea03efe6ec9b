//! Keyword search over note summaries

/// Case-insensitive substring filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    needle: String,
}

impl KeywordFilter {
    /// The search text is used verbatim; only case is folded
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    /// An empty search imposes no constraint
    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// Test a `summary_en` value. A missing summary fails any active search.
    pub fn matches(&self, summary: Option<&str>) -> bool {
        if !self.is_active() {
            return true;
        }
        summary.is_some_and(|s| s.to_lowercase().contains(&self.needle))
    }
}
