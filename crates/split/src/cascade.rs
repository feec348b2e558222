//! Separator cascade.
//!
//! Fragments are byte spans of the source document plus the list of split
//! points recorded inside them. Text is only materialized when a fragment is
//! emitted, so every chunk knows exactly which source bytes it came from.

use crate::merging::merge_fragments;
use crate::placeholder::PlaceholderCodec;
use std::ops::Range;

/// A split point: the separator bytes at `start..end` were removed and are
/// represented by a placeholder marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub start: usize,
    pub end: usize,
    /// Index into the configured separator list
    pub separator: usize,
}

/// Transient piece of the document during splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub span: Range<usize>,
    /// Split points inside `span`, sorted by offset
    pub boundaries: Vec<Boundary>,
    /// Emitted length in characters
    pub size: usize,
}

impl Fragment {
    pub fn new(source: &str, span: Range<usize>, boundaries: Vec<Boundary>) -> Self {
        let size = source[span.clone()].chars().count();
        Self {
            span,
            boundaries,
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Append the fragment that immediately follows this one in the source.
    pub fn absorb(&mut self, next: Fragment) {
        debug_assert_eq!(self.span.end, next.span.start);
        self.span.end = next.span.end;
        self.boundaries.extend(next.boundaries);
        self.size += next.size;
    }

    /// Split on every literal occurrence of `separator`.
    ///
    /// Each piece except the last keeps the separator bytes at its end as a
    /// new boundary. Occurrences overlapping an existing boundary are ignored,
    /// since that text has already been replaced by a marker.
    pub fn split_on(self, source: &str, separator: &str, separator_index: usize) -> Vec<Fragment> {
        let base = self.span.start;
        let slice = &source[self.span.clone()];

        let mut pieces = Vec::new();
        let mut piece_start = base;
        let mut piece_bounds = Vec::new();
        let mut pending = self.boundaries.into_iter().peekable();

        for (offset, matched) in slice.match_indices(separator) {
            let start = base + offset;
            let end = start + matched.len();

            while let Some(boundary) = pending.next_if(|b| b.end <= start) {
                piece_bounds.push(boundary);
            }
            if pending.peek().is_some_and(|b| b.start < end) {
                continue;
            }

            piece_bounds.push(Boundary {
                start,
                end,
                separator: separator_index,
            });
            pieces.push(Fragment::new(
                source,
                piece_start..end,
                std::mem::take(&mut piece_bounds),
            ));
            piece_start = end;
        }

        piece_bounds.extend(pending);
        pieces.push(Fragment::new(source, piece_start..self.span.end, piece_bounds));
        pieces
    }

    /// Source text with every boundary replaced by its marker.
    pub fn render(&self, source: &str, separators: &[String], codec: &PlaceholderCodec) -> String {
        let mut out = String::with_capacity(self.span.len());
        let mut cursor = self.span.start;

        for boundary in &self.boundaries {
            out.push_str(&source[cursor..boundary.start]);
            out.push_str(&codec.encode_boundary(&separators[boundary.separator]));
            cursor = boundary.end;
        }
        out.push_str(&source[cursor..self.span.end]);
        out
    }
}

/// Run the separator cascade over `source`.
///
/// Returns no fragments for an empty document. Fragments that still exceed
/// `chunk_size` once the separators are exhausted are returned whole.
pub(crate) fn cascade(
    source: &str,
    separators: &[String],
    chunk_size: usize,
    trace: bool,
) -> Vec<Fragment> {
    if source.is_empty() {
        return Vec::new();
    }

    let mut fragments = vec![Fragment::new(source, 0..source.len(), Vec::new())];

    for (index, separator) in separators.iter().enumerate() {
        if fragments.iter().all(|f| f.size <= chunk_size) {
            break;
        }

        let mut next = Vec::with_capacity(fragments.len());
        for (position, fragment) in fragments.into_iter().enumerate() {
            if fragment.size <= chunk_size {
                next.push(fragment);
                continue;
            }

            let size = fragment.size;
            let pieces = fragment.split_on(source, separator, index);
            let piece_count = pieces.len();
            let merged = merge_fragments(pieces, chunk_size);

            if trace {
                tracing::trace!(
                    separator = ?separator,
                    fragment = position,
                    size,
                    pieces = piece_count,
                    merged = merged.len(),
                    "Split oversize fragment"
                );
            }
            next.extend(merged);
        }
        fragments = next;

        tracing::debug!(
            "Separator #{} {:?}: {} fragments, {} over {} chars",
            index + 1,
            separator,
            fragments.len(),
            fragments.iter().filter(|f| f.size > chunk_size).count(),
            chunk_size
        );
    }

    fragments
}
