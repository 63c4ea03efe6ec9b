//! Fixed-size pages with external links

use crate::note::Note;
use std::ops::Range;

/// Rows per page
pub const PAGE_SIZE: usize = 50;

/// Base URL of an external status link
pub const STATUS_URL: &str = "https://www.x.com/i/web/status/";

/// Number of pages for `len` rows; at least one, even when empty
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Row range of 1-based page `page`, clipped to `len`. Page 0 is read as page 1.
pub fn page_bounds(len: usize, page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(PAGE_SIZE)
        .min(len);
    let end = start.saturating_add(PAGE_SIZE).min(len);
    start..end
}

pub fn status_link(identifier: &str) -> String {
    format!("{}{}", STATUS_URL, identifier)
}

/// One page of the filtered subset
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// 1-based page number
    pub number: usize,
    pub total_pages: usize,
    /// Rows in the whole subset
    pub total_rows: usize,
    /// Subset range covered by this page
    pub range: Range<usize>,
    pub rows: Vec<PageRow<'a>>,
}

impl<'a> Page<'a> {
    pub(crate) fn new(notes: &[&'a Note], number: usize, links: bool) -> Self {
        let range = page_bounds(notes.len(), number);
        let rows = notes[range.clone()]
            .iter()
            .map(|note| PageRow::new(note, links))
            .collect();

        Self {
            number: number.max(1),
            total_pages: total_pages(notes.len()),
            total_rows: notes.len(),
            range,
            rows,
        }
    }

    /// "Showing rows {first} to {last} of {total_rows}" with 1-based `first`
    pub fn showing(&self) -> (usize, usize) {
        (self.range.start + 1, self.range.end)
    }
}

/// A row plus its link; the link is empty when the row has no identifier
#[derive(Debug, Clone)]
pub struct PageRow<'a> {
    pub note: &'a Note,
    pub link: String,
}

impl<'a> PageRow<'a> {
    fn new(note: &'a Note, links: bool) -> Self {
        let link = match (&note.identifier, links) {
            (Some(id), true) => status_link(id),
            _ => String::new(),
        };
        Self { note, link }
    }

    /// `[id](url)`, or empty
    pub fn markdown_link(&self) -> String {
        match &self.note.identifier {
            Some(id) if !self.link.is_empty() => format!("[{}]({})", id, self.link),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(50), 1);
        assert_eq!(total_pages(51), 2);
        assert_eq!(total_pages(120), 3);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(120, 1), 0..50);
        assert_eq!(page_bounds(120, 2), 50..100);
        assert_eq!(page_bounds(120, 3), 100..120);
        assert_eq!(page_bounds(120, 4), 120..120);
        assert_eq!(page_bounds(0, 1), 0..0);
        assert_eq!(page_bounds(10, 0), 0..10);
        assert_eq!(page_bounds(10, usize::MAX), 10..10);
    }

    #[test]
    fn test_status_link() {
        assert_eq!(status_link("123"), "https://www.x.com/i/web/status/123");
    }
}
