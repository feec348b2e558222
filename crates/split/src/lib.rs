//! Recursive, size-bounded, provenance-preserving text splitter.
//!
//! Prepares long documents for embedding and retrieval:
//! - Splits on an ordered separator cascade, coarsest first, only where a
//!   fragment is still over the target size
//! - Greedily merges neighbouring fragments back up to the target size
//! - Marks split points with reversible (or length-preserving) placeholders
//! - Borrows overlap from neighbouring chunks
//! - Maps every chunk back to the pages it came from
//!
//! # Example
//!
//! ```
//! use seam_split::{RecursiveSplitter, SplitConfig};
//! use std::collections::BTreeMap;
//!
//! let splitter = RecursiveSplitter::new(
//!     SplitConfig::builder()
//!         .separators(["\n\n", "\n", " "])
//!         .chunk_size(15)
//!         .build(),
//! )?;
//!
//! let pages = ["Page one text. ", "Page two text."];
//! let mut metadata = BTreeMap::new();
//! metadata.insert("source".to_string(), vec!["brief.pdf", "brief.pdf"]);
//!
//! let records = splitter.split_documents(pages, &metadata)?;
//! assert_eq!(records[0].page_numbers, vec![0]);
//! assert_eq!(records[1].page_numbers, vec![1]);
//! # Ok::<(), seam_split::SplitError>(())
//! ```

pub mod assembly;
mod cascade;
pub mod config;
pub mod error;
mod merging;
pub mod overlap;
pub mod pipeline;
pub mod placeholder;
pub mod provenance;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::{PlaceholderMode, SplitConfig, SplitConfigBuilder, DEFAULT_SEPARATORS};
pub use error::{SplitError, SplitResult};
pub use overlap::add_overlap;
pub use pipeline::RecursiveSplitter;
pub use placeholder::{PlaceholderCodec, PlaceholderMap};
pub use provenance::PageIndex;
pub use types::{Chunk, ChunkRecord, Document, OverlappedChunk, SplitOutput};
