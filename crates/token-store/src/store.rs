//! The guarded token store
//!
//! The store owns all category maps and their metadata. It is an explicit
//! value constructed by the pipeline and passed by reference to whichever
//! component needs it; there is no module-global state. The
//! [`TokenStore::validate_all_tokens`] guard is the single gate that keeps
//! consumers from reading placeholder data, and callers run it eagerly at
//! entry rather than per access.

use crate::metadata::TokenMetadata;
use crate::schema::{CategoryMaps, ExtractionMetadata, TokenCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Errors that can occur loading or saving the token snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error on the snapshot file
    #[error("IO error on token snapshot {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for a token store
    #[error("Malformed token snapshot {path}: {source}")]
    Malformed {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error raised by the runtime guard when tokens are not ready
///
/// Enumerates every category still in placeholder mode so one failure
/// reports the full picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessError {
    /// Categories still in placeholder mode
    pub categories: Vec<TokenCategory>,
}

impl std::fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.categories.iter().map(TokenCategory::as_str).collect();
        write!(
            f,
            "design tokens are not ready: categories still in placeholder mode: {}. \
             Run extract-tokens with Figma credentials to populate them.",
            names.join(", ")
        )
    }
}

impl std::error::Error for ReadinessError {}

/// The design-token store: category maps plus per-category metadata
///
/// Created all-placeholder at initialization and replaced wholesale by an
/// extraction run. The serialized form of this struct is the canonical JSON
/// snapshot (`tokens.json`) that hands extraction results to the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStore {
    /// All category maps
    #[serde(flatten)]
    pub maps: CategoryMaps,
    /// Metadata per category
    pub metadata: BTreeMap<TokenCategory, TokenMetadata>,
}

impl TokenStore {
    /// The all-placeholder initial store
    pub fn placeholder() -> Self {
        let metadata = TokenCategory::all()
            .into_iter()
            .map(|category| (category, TokenMetadata::placeholder()))
            .collect();
        Self {
            maps: CategoryMaps::placeholder(),
            metadata,
        }
    }

    /// Build an extracted store from transformed maps and run metadata
    ///
    /// Every category is marked extracted, with its own token count.
    pub fn from_extraction(maps: CategoryMaps, extraction: &ExtractionMetadata) -> Self {
        let metadata = TokenCategory::all()
            .into_iter()
            .map(|category| {
                let count = match category {
                    TokenCategory::Color => {
                        let shades: usize = maps.colors.values().map(BTreeMap::len).sum();
                        shades + maps.semantics.len()
                    }
                    TokenCategory::Spacing => maps.spacing.len(),
                    TokenCategory::Typography => maps.typography.len(),
                    TokenCategory::Effect => maps.effects.len(),
                };
                (category, TokenMetadata::extracted(extraction, count))
            })
            .collect();
        Self { maps, metadata }
    }

    /// Metadata for one category
    ///
    /// Categories absent from a hand-edited snapshot fall back to
    /// placeholder metadata, which the guard then rejects.
    pub fn category_metadata(&self, category: TokenCategory) -> TokenMetadata {
        self.metadata
            .get(&category)
            .cloned()
            .unwrap_or_else(TokenMetadata::placeholder)
    }

    /// The runtime guard: refuse consumption while any category is unready
    ///
    /// A category is unready when its metadata says placeholder mode, when
    /// the metadata invariant is broken, or when any of its leaf values is
    /// still a placeholder. Returns one error naming every unready category.
    pub fn validate_all_tokens(&self) -> std::result::Result<(), ReadinessError> {
        let mut unready = Vec::new();
        for category in TokenCategory::all() {
            let meta = self.category_metadata(category);
            if meta.placeholder_mode
                || !meta.is_consistent()
                || self.maps.category_has_placeholder(category)
            {
                unready.push(category);
            }
        }
        if unready.is_empty() {
            Ok(())
        } else {
            Err(ReadinessError { categories: unready })
        }
    }

    /// Load a store from its canonical JSON snapshot
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the store to its canonical JSON snapshot
    ///
    /// Writes through a temp file and renames, so a crash mid-write never
    /// leaves a truncated snapshot behind.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await.map_err(io_err)?;
        file.write_all(json.as_bytes()).await.map_err(io_err)?;
        file.write_all(b"\n").await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        fs::rename(&tmp_path, path).await.map_err(io_err)?;

        tracing::info!("Saved token snapshot to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TokenValue;
    use chrono::Utc;

    fn extracted_store() -> TokenStore {
        let mut maps = CategoryMaps::default();
        maps.colors.insert(
            "primary".to_string(),
            [("500".to_string(), TokenValue::scalar("#3b82f6"))].into(),
        );
        maps.spacing.insert("md".to_string(), TokenValue::scalar("16px"));
        maps.typography.insert(
            "body".to_string(),
            TokenValue::composite([("fontFamily", "Inter"), ("fontSize", "16px")]),
        );
        maps.effects.insert(
            "shadow-sm".to_string(),
            TokenValue::composite([("blur", "2px"), ("color", "rgba(0, 0, 0, 0.05)")]),
        );

        let extraction = ExtractionMetadata {
            figma_file_id: "FILE123".to_string(),
            extracted_at: Utc::now(),
            token_count: 4,
            version: "7".to_string(),
        };
        TokenStore::from_extraction(maps, &extraction)
    }

    #[test]
    fn test_placeholder_store_fails_guard() {
        let store = TokenStore::placeholder();
        let err = store.validate_all_tokens().unwrap_err();

        // Every category should be named.
        assert_eq!(err.categories.len(), 4);
        let message = err.to_string();
        assert!(message.contains("color"));
        assert!(message.contains("spacing"));
        assert!(message.contains("typography"));
        assert!(message.contains("effect"));
    }

    #[test]
    fn test_extracted_store_passes_guard() {
        let store = extracted_store();
        assert!(store.validate_all_tokens().is_ok());
    }

    #[test]
    fn test_guard_catches_single_placeholder_leaf() {
        let mut store = extracted_store();
        store
            .maps
            .spacing
            .insert("xl".to_string(), TokenValue::Placeholder);

        let err = store.validate_all_tokens().unwrap_err();
        assert_eq!(err.categories, vec![TokenCategory::Spacing]);
    }

    #[test]
    fn test_guard_catches_inconsistent_metadata() {
        let mut store = extracted_store();
        let meta = store.metadata.get_mut(&TokenCategory::Effect).unwrap();
        meta.placeholder_mode = true;

        let err = store.validate_all_tokens().unwrap_err();
        assert_eq!(err.categories, vec![TokenCategory::Effect]);
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");

        let store = extracted_store();
        store.save(&path).await.unwrap();

        let loaded = TokenStore::load(&path).await.unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = TokenStore::load(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = TokenStore::load(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_snapshot_shape_is_flat() {
        // The snapshot is the hand-off contract: category maps at the top
        // level next to the metadata record.
        let store = extracted_store();
        let json: serde_json::Value = serde_json::to_value(&store).unwrap();

        assert!(json.get("colors").is_some());
        assert!(json.get("spacing").is_some());
        assert!(json.get("typography").is_some());
        assert!(json.get("effects").is_some());
        assert!(json.get("semantics").is_some());
        assert!(json.get("metadata").is_some());
        assert_eq!(json["metadata"]["color"]["figmaFileId"], "FILE123");
    }
}
