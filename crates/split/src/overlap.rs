//! Overlap injection between neighbouring chunks.
//!
//! The first chunk borrows only from the start of the second, the last only
//! from the end of the one before it, interior chunks from both sides. A
//! borrow never takes more than the neighbour has.

use crate::types::{Chunk, OverlappedChunk};

/// First `count` characters of `text`.
pub(crate) fn head(text: &str, count: usize) -> &str {
    text.char_indices()
        .nth(count)
        .map_or(text, |(i, _)| &text[..i])
}

/// Last `count` characters of `text`.
pub(crate) fn tail(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    text.char_indices()
        .rev()
        .nth(count - 1)
        .map_or(text, |(i, _)| &text[i..])
}

/// Add `overlap` characters from each neighbour to every chunk.
///
/// ```
/// use seam_split::add_overlap;
///
/// let chunks = ["hello", "world", "again"];
/// assert_eq!(
///     add_overlap(&chunks, 3),
///     vec!["hellowor", "lloworldaga", "rldagain"]
/// );
/// ```
pub fn add_overlap<S: AsRef<str>>(chunks: &[S], overlap: usize) -> Vec<String> {
    (0..chunks.len())
        .map(|i| {
            let mut text = String::new();
            if i > 0 {
                text.push_str(tail(chunks[i - 1].as_ref(), overlap));
            }
            text.push_str(chunks[i].as_ref());
            if let Some(next) = chunks.get(i + 1) {
                text.push_str(head(next.as_ref(), overlap));
            }
            text
        })
        .collect()
}

/// Overlap finalized chunks, extending each span over the borrowed source bytes.
pub(crate) fn overlap_chunks(chunks: &[Chunk], source: &str, overlap: usize) -> Vec<OverlappedChunk> {
    (0..chunks.len())
        .map(|i| {
            let chunk = &chunks[i];
            let mut text = String::with_capacity(chunk.text.len() + 2 * overlap);
            let mut span = chunk.span.clone();
            let mut leading = 0;
            let mut trailing = 0;

            if overlap > 0 && i > 0 {
                let prev = &chunks[i - 1];
                let borrowed = tail(&prev.text, overlap);
                leading = borrowed.chars().count();
                span.start -= tail(&source[prev.span.clone()], leading).len();
                text.push_str(borrowed);
            }

            text.push_str(&chunk.text);

            if let Some(next) = chunks.get(i + 1).filter(|_| overlap > 0) {
                let borrowed = head(&next.text, overlap);
                trailing = borrowed.chars().count();
                span.end += head(&source[next.span.clone()], trailing).len();
                text.push_str(borrowed);
            }

            let clamped_leading = i > 0 && leading < overlap;
            let clamped_trailing = i + 1 < chunks.len() && trailing < overlap;
            if overlap > 0 && (clamped_leading || clamped_trailing) {
                tracing::debug!(
                    "Overlap for chunk {} clamped to neighbour length ({} leading, {} trailing)",
                    i,
                    leading,
                    trailing
                );
            }

            OverlappedChunk {
                text,
                leading,
                trailing,
                span,
                oversize: chunk.oversize,
            }
        })
        .collect()
}
