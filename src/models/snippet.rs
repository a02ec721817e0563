//! Retrieved context chunks and their provenance.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One chunk of source-document text returned by the vector-search index.
///
/// Carries the chunk text plus the provenance metadata the index stores for
/// it. Only the text feeds the prompt; the metadata exists for display and
/// debugging, so the timestamp fields are absent rather than fatal when the
/// index returns something unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnippet {
    /// Name of the source file the chunk was extracted from
    file: String,
    /// When the source file was last modified
    #[serde(with = "time::serde::rfc3339::option")]
    modified: Option<OffsetDateTime>,
    /// When the row was last synced into the index
    #[serde(with = "time::serde::rfc3339::option")]
    synced: Option<OffsetDateTime>,
    /// Position of this chunk within the source file
    chunk_index: Option<i64>,
    /// The chunk text itself
    text: String,
}

impl ContextSnippet {
    /// Creates a new `ContextSnippet`.
    pub fn new(
        file: impl Into<String>,
        modified: Option<OffsetDateTime>,
        synced: Option<OffsetDateTime>,
        chunk_index: Option<i64>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            modified,
            synced,
            chunk_index,
            text: text.into(),
        }
    }

    /// Returns the source file name.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns when the source file was last modified, if known.
    pub fn modified(&self) -> Option<OffsetDateTime> {
        self.modified
    }

    /// Returns when the row was synced into the index, if known.
    pub fn synced(&self) -> Option<OffsetDateTime> {
        self.synced
    }

    /// Returns the chunk's position within its source file, if known.
    pub fn chunk_index(&self) -> Option<i64> {
        self.chunk_index
    }

    /// Returns the chunk text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// One-line provenance description for logs.
    pub fn provenance(&self) -> String {
        let chunk = self
            .chunk_index
            .map_or_else(|| "?".to_string(), |i| i.to_string());
        match self.modified.and_then(|t| t.format(&Rfc3339).ok()) {
            Some(modified) => format!("{} (chunk {chunk}, modified {modified})", self.file),
            None => format!("{} (chunk {chunk})", self.file),
        }
    }

    /// Parses a wire timestamp, treating anything non-RFC 3339 as absent.
    pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(value, &Rfc3339).ok()
    }
}
