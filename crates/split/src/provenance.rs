//! Page provenance.
//!
//! Maps a byte span of the concatenated document back to the 0-indexed pages
//! it covers. Spans are exact (tracked through every splitting step), so no
//! offset correction for overlap or markers is needed here.

use std::ops::Range;

/// Cumulative page start offsets for one multi-page document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndex {
    /// Byte offset where each page starts in the concatenated text
    starts: Vec<usize>,
    total: usize,
}

impl PageIndex {
    pub fn new<S: AsRef<str>>(pages: &[S]) -> Self {
        let mut starts = Vec::with_capacity(pages.len());
        let mut total = 0;
        for page in pages {
            starts.push(total);
            total += page.as_ref().len();
        }
        Self { starts, total }
    }

    pub fn page_count(&self) -> usize {
        self.starts.len()
    }

    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Total length of the concatenated text in bytes.
    pub fn total_len(&self) -> usize {
        self.total
    }

    /// Page containing the byte at `offset`.
    ///
    /// The page before the first start offset strictly greater than `offset`,
    /// which skips over empty pages. Offsets past the end map to the last page.
    pub fn page_at(&self, offset: usize) -> Option<usize> {
        if self.starts.is_empty() {
            return None;
        }
        let after = self.starts.partition_point(|&start| start <= offset);
        Some(after.saturating_sub(1))
    }

    /// Every page touched by `span`, in order.
    pub fn pages_for(&self, span: Range<usize>) -> Vec<usize> {
        let last_byte = if span.is_empty() {
            span.start
        } else {
            span.end - 1
        };

        match (self.page_at(span.start), self.page_at(last_byte)) {
            (Some(first), Some(last)) => (first..=last).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_starts() {
        let index = PageIndex::new(&["Page one text. ", "Page two text."]);
        assert_eq!(index.starts(), &[0, 15]);
        assert_eq!(index.total_len(), 29);
        assert_eq!(index.page_count(), 2);
    }

    #[test]
    fn test_page_at_boundaries() {
        let index = PageIndex::new(&["abc", "de", "f"]);
        assert_eq!(index.page_at(0), Some(0));
        assert_eq!(index.page_at(2), Some(0));
        assert_eq!(index.page_at(3), Some(1));
        assert_eq!(index.page_at(5), Some(2));
        assert_eq!(index.page_at(99), Some(2));
    }

    #[test]
    fn test_span_ending_on_page_break_stays_on_page() {
        let index = PageIndex::new(&["Page one text. ", "Page two text."]);
        assert_eq!(index.pages_for(0..15), vec![0]);
        assert_eq!(index.pages_for(15..29), vec![1]);
        assert_eq!(index.pages_for(14..29), vec![0, 1]);
    }

    #[test]
    fn test_span_across_many_pages() {
        let index = PageIndex::new(&["aa", "bb", "cc", "dd"]);
        assert_eq!(index.pages_for(1..7), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_pages_skipped() {
        let index = PageIndex::new(&["abc", "", "def"]);
        assert_eq!(index.page_at(3), Some(2));
        assert_eq!(index.pages_for(3..6), vec![2]);
        assert_eq!(index.pages_for(2..4), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_pages() {
        let index = PageIndex::new::<&str>(&[]);
        assert_eq!(index.page_at(0), None);
        assert!(index.pages_for(0..4).is_empty());
    }
}
