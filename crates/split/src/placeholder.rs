//! Placeholder codec for split points.
//!
//! When a fragment is split on a separator, the separator is replaced by a
//! marker at the end of every piece but the last. In reconstruct mode the
//! marker is a short registered token (`"\n\n"` becomes `~P`) that
//! [`PlaceholderCodec::reconstruct`] turns back into the separator. In
//! preserve-length mode the marker is filler of the same length as the
//! separator, so character offsets line up with the source.

use crate::config::PlaceholderMode;
use crate::error::{SplitError, SplitResult};
use std::borrow::Cow;

/// Marker used for separators with no registered token.
pub const FALLBACK_MARKER: &str = "~";

/// Filler character used in preserve-length mode.
pub const FILLER: char = '~';

/// Bidirectional separator/marker table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl Default for PlaceholderMap {
    fn default() -> Self {
        let entries = [
            ("\n\n", "~P"),
            ("\n", "~L"),
            (".", "~D"),
            (",", "~C"),
            (" ", "~S"),
        ];
        Self {
            entries: entries
                .iter()
                .map(|(sep, marker)| (sep.to_string(), marker.to_string()))
                .collect(),
        }
    }
}

impl PlaceholderMap {
    /// A table with no registered separators.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register (or replace) the marker for `separator`.
    ///
    /// Markers must be non-empty and may not be shared between separators.
    pub fn with_marker(
        mut self,
        separator: impl Into<String>,
        marker: impl Into<String>,
    ) -> SplitResult<Self> {
        let separator = separator.into();
        let marker = marker.into();

        let invalid = |reason: &str| SplitError::InvalidMarker {
            separator: separator.clone(),
            reason: reason.to_string(),
        };

        if separator.is_empty() {
            return Err(invalid("separator is empty"));
        }
        if marker.is_empty() {
            return Err(invalid("marker is empty"));
        }
        if self
            .entries
            .iter()
            .any(|(sep, existing)| *existing == marker && *sep != separator)
        {
            return Err(invalid("marker already registered for another separator"));
        }

        match self.entries.iter_mut().find(|(sep, _)| *sep == separator) {
            Some(entry) => entry.1 = marker,
            None => self.entries.push((separator, marker)),
        }
        Ok(self)
    }

    /// Marker registered for `separator`, if any.
    pub fn marker_for(&self, separator: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(sep, _)| sep == separator)
            .map(|(_, marker)| marker.as_str())
    }

    /// Separator registered for `marker`, if any.
    pub fn separator_for(&self, marker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, m)| m == marker)
            .map(|(sep, _)| sep.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(sep, marker)| (sep.as_str(), marker.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Encodes split points and decodes markers for one placeholder mode.
#[derive(Debug, Clone)]
pub struct PlaceholderCodec {
    map: PlaceholderMap,
    mode: PlaceholderMode,
    /// (marker, separator), longest marker first
    decode_table: Vec<(String, String)>,
}

impl PlaceholderCodec {
    pub fn new(map: PlaceholderMap, mode: PlaceholderMode) -> Self {
        let mut decode_table: Vec<(String, String)> = map
            .iter()
            .map(|(sep, marker)| (marker.to_string(), sep.to_string()))
            .collect();
        decode_table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            map,
            mode,
            decode_table,
        }
    }

    pub fn map(&self) -> &PlaceholderMap {
        &self.map
    }

    pub fn mode(&self) -> PlaceholderMode {
        self.mode
    }

    /// Marker that stands in for `separator` at a split point.
    pub fn encode_boundary(&self, separator: &str) -> Cow<'_, str> {
        match self.mode {
            PlaceholderMode::Reconstruct => {
                Cow::Borrowed(self.map.marker_for(separator).unwrap_or(FALLBACK_MARKER))
            }
            PlaceholderMode::PreserveLength => {
                Cow::Owned(std::iter::repeat(FILLER).take(separator.chars().count()).collect())
            }
        }
    }

    /// Replace every registered marker in `text` with its separator.
    ///
    /// Identity in preserve-length mode. The fallback marker is never decoded.
    pub fn reconstruct(&self, text: &str) -> String {
        if self.mode == PlaceholderMode::PreserveLength || self.decode_table.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        'scan: while !rest.is_empty() {
            for (marker, separator) in &self.decode_table {
                if let Some(after) = rest.strip_prefix(marker.as_str()) {
                    out.push_str(separator);
                    rest = after;
                    continue 'scan;
                }
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }

        out
    }
}
