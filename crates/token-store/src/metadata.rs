//! Per-category extraction metadata
//!
//! Each token category carries a metadata record describing where its
//! values came from and whether they are real or placeholders. The pair
//! `is_extracted` / `placeholder_mode` is always complementary; the two
//! fields exist separately because both appear in the serialized snapshot
//! and both are asserted independently by the validator.

use crate::schema::ExtractionMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one token category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Source Figma file id, or `"UNSET"` before the first extraction
    pub figma_file_id: String,
    /// Timestamp of the last successful sync
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    /// Number of tokens in this category
    pub token_count: usize,
    /// Figma document version at sync time
    pub version: String,
    /// True once real values have been extracted
    pub is_extracted: bool,
    /// True while the category still holds placeholder values
    pub placeholder_mode: bool,
}

impl TokenMetadata {
    /// Metadata for a category that has never been extracted
    pub fn placeholder() -> Self {
        Self {
            figma_file_id: "UNSET".to_string(),
            last_sync: None,
            token_count: 0,
            version: "0.0.0".to_string(),
            is_extracted: false,
            placeholder_mode: true,
        }
    }

    /// Metadata for a category populated by the given extraction run
    pub fn extracted(extraction: &ExtractionMetadata, token_count: usize) -> Self {
        Self {
            figma_file_id: extraction.figma_file_id.clone(),
            last_sync: Some(extraction.extracted_at),
            token_count,
            version: extraction.version.clone(),
            is_extracted: true,
            placeholder_mode: false,
        }
    }

    /// Check the `is_extracted` / `placeholder_mode` invariant
    ///
    /// The two flags must always disagree; a record where they agree has
    /// been corrupted or hand-edited.
    pub fn is_consistent(&self) -> bool {
        self.is_extracted != self.placeholder_mode
    }
}
