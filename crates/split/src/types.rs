//! Splitter type definitions.

use crate::assembly::create_documents;
use crate::error::SplitResult;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;

/// A finalized chunk before overlap is injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text as emitted by the placeholder mode
    pub text: String,

    /// Byte range in the source document
    pub span: Range<usize>,

    /// Longer than the target size and not reducible by any separator
    pub oversize: bool,
}

impl Chunk {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A chunk with text borrowed from its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlappedChunk {
    /// Leading borrow + chunk text + trailing borrow
    pub text: String,

    /// Characters borrowed from the previous chunk
    pub leading: usize,

    /// Characters borrowed from the next chunk
    pub trailing: usize,

    /// Byte range in the source document, borrowed text included
    pub span: Range<usize>,

    pub oversize: bool,
}

impl OverlappedChunk {
    /// The chunk text with the borrowed overlap removed.
    pub fn core_text(&self) -> &str {
        let start = self
            .text
            .char_indices()
            .nth(self.leading)
            .map_or(self.text.len(), |(i, _)| i);
        let core_chars = self.text[start..].chars().count().saturating_sub(self.trailing);
        let end = self.text[start..]
            .char_indices()
            .nth(core_chars)
            .map_or(self.text.len(), |(i, _)| start + i);
        &self.text[start..end]
    }
}

/// Input to a split: one whole text, or an ordered list of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Text(String),
    Pages(Vec<String>),
}

impl Document {
    /// The full text; pages are concatenated without separators.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Document::Text(text) => Cow::Borrowed(text),
            Document::Pages(pages) => Cow::Owned(pages.concat()),
        }
    }

    /// Per-page text, when page provenance was requested.
    pub fn pages(&self) -> Option<&[String]> {
        match self {
            Document::Text(_) => None,
            Document::Pages(pages) => Some(pages.as_slice()),
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::Text(text.to_string())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::Text(text)
    }
}

impl From<Vec<String>> for Document {
    fn from(pages: Vec<String>) -> Self {
        Document::Pages(pages)
    }
}

impl From<&[&str]> for Document {
    fn from(pages: &[&str]) -> Self {
        Document::Pages(pages.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Document {
    fn from(pages: [&str; N]) -> Self {
        Document::from(&pages[..])
    }
}

/// Final output record handed to the indexing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord<T = serde_json::Value> {
    /// Chunk text, overlap included
    pub text: String,

    /// 0-indexed source pages this chunk spans (empty without pages)
    pub page_numbers: Vec<usize>,

    /// Caller metadata, one value per key
    #[serde(default)]
    pub metadata: BTreeMap<String, T>,

    /// Longer than the target size
    pub oversize: bool,

    /// SHA-256 of `text`
    pub hash: String,
}

/// Result of splitting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutput {
    pub(crate) chunks: Vec<OverlappedChunk>,
    pub(crate) page_numbers: Vec<Vec<usize>>,
}

impl SplitOutput {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[OverlappedChunk] {
        &self.chunks
    }

    /// Page range per chunk; every entry is empty for a plain-text document.
    pub fn page_numbers(&self) -> &[Vec<usize>] {
        &self.page_numbers
    }

    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }

    /// Indices of chunks that exceed the target size.
    pub fn oversize_indices(&self) -> Vec<usize> {
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.oversize)
            .map(|(i, _)| i)
            .collect()
    }

    /// Zip chunks and page ranges with per-chunk caller metadata.
    ///
    /// Every value list must have exactly one entry per chunk.
    pub fn create_documents<T: Clone>(
        &self,
        metadata: &BTreeMap<String, Vec<T>>,
    ) -> SplitResult<Vec<ChunkRecord<T>>> {
        create_documents(&self.chunks, &self.page_numbers, metadata)
    }

    /// Records without caller metadata.
    pub fn to_documents(&self) -> Vec<ChunkRecord> {
        self.chunks
            .iter()
            .zip(&self.page_numbers)
            .map(|(chunk, pages)| crate::assembly::record(chunk, pages.clone(), BTreeMap::new()))
            .collect()
    }
}
