//! Splitting pipeline orchestrator.

use crate::assembly::create_documents;
use crate::cascade::{cascade, Fragment};
use crate::config::{PlaceholderMode, SplitConfig};
use crate::error::SplitResult;
use crate::merging::merge_fragments;
use crate::overlap::overlap_chunks;
use crate::placeholder::{PlaceholderCodec, PlaceholderMap};
use crate::provenance::PageIndex;
use crate::types::{Chunk, ChunkRecord, Document, SplitOutput};
use std::collections::BTreeMap;

/// Recursive, size-bounded text splitter.
///
/// Holds only its configuration and placeholder table, so one instance can
/// be shared across threads and reused for any number of documents.
///
/// ```
/// use seam_split::{RecursiveSplitter, SplitConfig};
///
/// let splitter = RecursiveSplitter::new(
///     SplitConfig::builder()
///         .separators(["\n\n", "\n", " "])
///         .chunk_size(50)
///         .build(),
/// )?;
///
/// let output = splitter.split(
///     "Paragraph one is short.\n\nParagraph two is also quite short and simple.",
/// );
/// assert_eq!(
///     output.texts(),
///     vec![
///         "Paragraph one is short.\n\n",
///         "Paragraph two is also quite short and simple.",
///     ]
/// );
/// # Ok::<(), seam_split::SplitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    config: SplitConfig,
    codec: PlaceholderCodec,
}

impl RecursiveSplitter {
    /// Create a splitter with the default placeholder table.
    pub fn new(config: SplitConfig) -> SplitResult<Self> {
        Self::with_placeholders(config, PlaceholderMap::default())
    }

    /// Create a splitter with a caller-supplied placeholder table.
    pub fn with_placeholders(config: SplitConfig, map: PlaceholderMap) -> SplitResult<Self> {
        config.validate()?;

        if config.separators.is_empty() {
            tracing::warn!(
                "Splitter has no separators; every document becomes a single chunk"
            );
        }

        if config.mode == PlaceholderMode::Reconstruct {
            for separator in &config.separators {
                if map.marker_for(separator).is_none() {
                    tracing::warn!(
                        "Separator {:?} has no registered marker; split points fall back to the source text",
                        separator
                    );
                }
            }
        }

        let codec = PlaceholderCodec::new(map, config.mode);
        Ok(Self { config, codec })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn codec(&self) -> &PlaceholderCodec {
        &self.codec
    }

    /// Cascade, then one more greedy pass across the whole fragment list.
    fn fragments(&self, text: &str) -> Vec<Fragment> {
        let fragments = cascade(
            text,
            &self.config.separators,
            self.config.chunk_size,
            self.config.trace,
        );
        merge_fragments(fragments, self.config.chunk_size)
    }

    /// Split `text` into chunks, without overlap.
    ///
    /// An empty text yields no chunks.
    pub fn split_text(&self, text: &str) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self
            .fragments(text)
            .iter()
            .map(|fragment| self.emit(text, fragment))
            .collect();

        for (i, chunk) in chunks.iter().enumerate().filter(|(_, c)| c.oversize) {
            tracing::warn!(
                "Chunk {} is {} chars, over the {} char target, and no separator can split it",
                i,
                chunk.len(),
                self.config.chunk_size
            );
        }

        chunks
    }

    /// Split `text` and return each chunk in its placeholder-encoded form.
    ///
    /// Concatenating the result and passing it to [`Self::reconstruct`]
    /// gives back `text` in reconstruct mode.
    pub fn split_encoded(&self, text: &str) -> Vec<String> {
        self.fragments(text)
            .iter()
            .map(|fragment| fragment.render(text, &self.config.separators, &self.codec))
            .collect()
    }

    /// Split a document, inject overlap, and map chunks to pages.
    pub fn split(&self, document: impl Into<Document>) -> SplitOutput {
        let document = document.into();
        let text = document.text();

        let chunks = self.split_text(&text);
        let overlapped = overlap_chunks(&chunks, &text, self.config.overlap);

        let page_numbers = match document.pages() {
            Some(pages) => {
                let index = PageIndex::new(pages);
                overlapped
                    .iter()
                    .map(|chunk| index.pages_for(chunk.span.clone()))
                    .collect()
            }
            None => vec![Vec::new(); overlapped.len()],
        };

        tracing::info!(
            "Split {} bytes into {} chunks ({} oversize)",
            text.len(),
            overlapped.len(),
            chunks.iter().filter(|c| c.oversize).count()
        );

        SplitOutput {
            chunks: overlapped,
            page_numbers,
        }
    }

    /// Split a document and attach per-chunk caller metadata.
    pub fn split_documents<T: Clone>(
        &self,
        document: impl Into<Document>,
        metadata: &BTreeMap<String, Vec<T>>,
    ) -> SplitResult<Vec<ChunkRecord<T>>> {
        let output = self.split(document);
        create_documents(&output.chunks, &output.page_numbers, metadata)
    }

    /// Replace placeholder markers in `text` with their separators.
    pub fn reconstruct(&self, text: &str) -> String {
        self.codec.reconstruct(text)
    }

    fn emit(&self, source: &str, fragment: &Fragment) -> Chunk {
        let encoded = fragment.render(source, &self.config.separators, &self.codec);

        let text = match self.config.mode {
            PlaceholderMode::PreserveLength => encoded,
            PlaceholderMode::Reconstruct => {
                let original = &source[fragment.span.clone()];
                let decoded = self.codec.reconstruct(&encoded);
                if decoded == original {
                    decoded
                } else {
                    tracing::warn!(
                        "Placeholder markers collide with text at bytes {:?}; using source text",
                        fragment.span
                    );
                    original.to_string()
                }
            }
        };

        Chunk {
            text,
            span: fragment.span.clone(),
            oversize: fragment.size > self.config.chunk_size,
        }
    }
}
