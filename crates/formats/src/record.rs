//! Record data structure for a single CSV row

/// A single row from a dataset, cells kept verbatim in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Raw cell values, one per header column
    pub values: Vec<String>,
    /// Source line number (1-based, header is line 1)
    pub source_line: usize,
}

impl Record {
    /// Create a new record
    pub fn new(values: Vec<String>, source_line: usize) -> Self {
        Self {
            values,
            source_line,
        }
    }

    /// Cell at `index`, or `None` when the column is out of range or the cell is empty.
    ///
    /// An empty cell is how a CSV encodes a missing value.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
