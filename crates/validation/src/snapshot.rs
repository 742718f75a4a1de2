//! Ground-truth snapshot loading
//!
//! The snapshot (`tokens-from-figma.json`) is the externally authored JSON
//! document treated as the source of truth for validation. Loading it is
//! the only fatal step of a validation run: without ground truth there is
//! nothing to validate against, so a missing or malformed file aborts the
//! process with a non-zero exit and no retry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors that can occur loading the ground-truth snapshot
#[derive(Debug, Error)]
pub enum SnapshotLoadError {
    /// The snapshot file does not exist or cannot be read
    #[error("Cannot read token snapshot {path}: {source}")]
    Missing {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for a token document
    #[error("Malformed token snapshot {path}: {source}")]
    Malformed {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

/// Result type for snapshot loading
pub type Result<T> = std::result::Result<T, SnapshotLoadError>;

/// Extraction metadata recorded in the ground-truth document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Source Figma file id
    pub figma_file_id: String,
    /// When the snapshot was exported
    pub extracted_at: String,
    /// Number of tokens in the snapshot
    pub token_count: usize,
    /// Figma document version at export time
    pub version: String,
}

/// One semantic alias declared by the ground truth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticEntry {
    /// Referenced primitive, as `"hue-shade"`
    pub reference: String,
    /// Resolved value at export time
    pub value: String,
}

/// The externally authored ground-truth token document
///
/// Structurally a flattened sibling of the committed store: plain string
/// leaves everywhere, since the ground truth never contains placeholders
/// by construction (and the leakage check would catch one anyway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTokenDocument {
    /// Export metadata
    pub metadata: SnapshotMetadata,
    /// Color primitives: hue -> shade -> hex
    pub colors: BTreeMap<String, BTreeMap<String, String>>,
    /// Semantic aliases
    #[serde(default)]
    pub semantics: BTreeMap<String, SemanticEntry>,
    /// Spacing scale
    pub spacing: BTreeMap<String, String>,
    /// Typography styles: name -> leaf -> value
    pub typography: BTreeMap<String, BTreeMap<String, String>>,
    /// Effects: name -> leaf -> value
    pub effects: BTreeMap<String, BTreeMap<String, String>>,
}

/// Load and parse the ground-truth snapshot
pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<FigmaTokenDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotLoadError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
    let document: FigmaTokenDocument =
        serde_json::from_str(&contents).map_err(|source| SnapshotLoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(
        "Loaded ground-truth snapshot from {} ({} tokens, version {})",
        path.display(),
        document.metadata.token_count,
        document.metadata.version
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "metadata": {
            "figmaFileId": "FILE123",
            "extractedAt": "2026-08-07T12:00:00Z",
            "tokenCount": 2,
            "version": "42"
        },
        "colors": { "primary": { "500": "#3b82f6" } },
        "semantics": { "accent": { "reference": "primary-500", "value": "#3b82f6" } },
        "spacing": { "md": "16px" },
        "typography": { "body": { "fontFamily": "Inter" } },
        "effects": { "shadow-sm": { "blur": "2px" } }
    }"##;

    #[tokio::test]
    async fn test_load_snapshot_parses_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tokens-from-figma.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let doc = load_snapshot(&path).await.unwrap();

        assert_eq!(doc.metadata.figma_file_id, "FILE123");
        assert_eq!(doc.colors["primary"]["500"], "#3b82f6");
        assert_eq!(doc.semantics["accent"].reference, "primary-500");
        assert_eq!(doc.spacing["md"], "16px");
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_snapshot(dir.path().join("absent.json")).await.unwrap_err();

        assert!(matches!(err, SnapshotLoadError::Missing { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tokens-from-figma.json");
        tokio::fs::write(&path, "{ \"colors\": [] }").await.unwrap();

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, SnapshotLoadError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_semantics_section_is_optional() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tokens-from-figma.json");
        let without_semantics = SAMPLE.replace(
            r##""semantics": { "accent": { "reference": "primary-500", "value": "#3b82f6" } },"##,
            "",
        );
        tokio::fs::write(&path, without_semantics).await.unwrap();

        let doc = load_snapshot(&path).await.unwrap();
        assert!(doc.semantics.is_empty());
    }
}
