//! Output assembly: chunks, page ranges and caller metadata into records.

use crate::error::{SplitError, SplitResult};
use crate::types::{ChunkRecord, OverlappedChunk};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Build one [`ChunkRecord`] per chunk.
///
/// `metadata` maps each key to one value per chunk; a list of any other
/// length is rejected before any record is built.
pub fn create_documents<T: Clone>(
    chunks: &[OverlappedChunk],
    page_numbers: &[Vec<usize>],
    metadata: &BTreeMap<String, Vec<T>>,
) -> SplitResult<Vec<ChunkRecord<T>>> {
    for (key, values) in metadata {
        if values.len() != chunks.len() {
            return Err(SplitError::MetadataLength {
                key: key.clone(),
                expected: chunks.len(),
                actual: values.len(),
            });
        }
    }

    let records = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let pages = page_numbers.get(i).cloned().unwrap_or_default();
            let values = metadata
                .iter()
                .map(|(key, values)| (key.clone(), values[i].clone()))
                .collect();
            record(chunk, pages, values)
        })
        .collect();

    Ok(records)
}

pub(crate) fn record<T>(
    chunk: &OverlappedChunk,
    page_numbers: Vec<usize>,
    metadata: BTreeMap<String, T>,
) -> ChunkRecord<T> {
    ChunkRecord {
        text: chunk.text.clone(),
        page_numbers,
        metadata,
        oversize: chunk.oversize,
        hash: content_hash(&chunk.text),
    }
}

/// Hex SHA-256 of the chunk text.
fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
