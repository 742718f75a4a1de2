//! Output assembly and file writing
//!
//! Assembles the full output set for one pipeline run (a TypeScript and a
//! Swift module per category plus the canonical JSON snapshot) and writes
//! the files. Each file write is independent: one failure neither corrupts
//! nor aborts the others, and the report lists exactly which paths
//! succeeded and which failed. Already-written files are never rolled back.

use crate::error::{CodegenError, Result};
use crate::identifier::{export_name, pascal_case};
use crate::swift::render_native_module;
use crate::typescript::render_module;
use std::path::{Path, PathBuf};
use token_store::{TokenCategory, TokenStore};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// One rendered output file, addressed relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the output directory
    pub relative_path: PathBuf,
    /// File contents
    pub contents: String,
}

/// Outcome of one [`write_all`] run
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Files written successfully
    pub written: Vec<PathBuf>,
    /// Files that failed, with the failure message
    pub failed: Vec<(PathBuf, String)>,
}

impl WriteReport {
    /// True when every file was written
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render the canonical JSON snapshot
///
/// The snapshot is the hand-off contract between extraction and
/// validation; like the module renderers it refuses to serialize a store
/// that still contains placeholder values.
pub fn render_snapshot(store: &TokenStore) -> Result<String> {
    for category in TokenCategory::all() {
        if let Some(path) = store.maps.first_placeholder_path(category) {
            return Err(CodegenError::PlaceholderToken {
                category: category.to_string(),
                path,
            });
        }
    }
    let mut json = serde_json::to_string_pretty(store)?;
    json.push('\n');
    Ok(json)
}

/// Render the complete output set for one extracted store
///
/// Layout under the output directory:
/// - `web/<category>.ts` per category (TypeScript dialect)
/// - `ios/<Category>.swift` per category (Swift dialect)
/// - `tokens.json` (canonical snapshot)
pub fn render_all(store: &TokenStore) -> Result<Vec<RenderedFile>> {
    let mut files = Vec::new();

    for category in TokenCategory::all() {
        let metadata = store.category_metadata(category);
        let name = export_name(category);

        files.push(RenderedFile {
            relative_path: PathBuf::from("web").join(format!("{name}.ts")),
            contents: render_module(category, &store.maps, &metadata)?,
        });
        files.push(RenderedFile {
            relative_path: PathBuf::from("ios").join(format!("{}.swift", pascal_case(name))),
            contents: render_native_module(category, &store.maps, &metadata)?,
        });
    }

    files.push(RenderedFile {
        relative_path: PathBuf::from("tokens.json"),
        contents: render_snapshot(store)?,
    });
    Ok(files)
}

/// Write every rendered file under the output directory
///
/// Writes go through a temp file and a rename, so a failure mid-write
/// never leaves a truncated output file behind.
pub async fn write_all(files: &[RenderedFile], out_dir: &Path) -> WriteReport {
    let mut report = WriteReport::default();
    for file in files {
        let path = out_dir.join(&file.relative_path);
        match write_one(&path, &file.contents).await {
            Ok(()) => {
                tracing::info!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {e}", path.display());
                report.failed.push((path, e.to_string()));
            }
        }
    }
    report
}

async fn write_one(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    fs::rename(&tmp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use token_store::{CategoryMaps, ExtractionMetadata, TokenValue};

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
            extracted_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            token_count: 4,
            version: "42".to_string(),
        };
        TokenStore::from_extraction(maps, &extraction)
    }

    #[test]
    fn test_render_all_produces_nine_files() {
        let files = render_all(&extracted_store()).unwrap();

        // Four categories in two dialects, plus the snapshot.
        assert_eq!(files.len(), 9);
        let paths: Vec<String> = files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().into_owned())
            .collect();
        assert!(paths.contains(&"web/colors.ts".to_string()));
        assert!(paths.contains(&"web/effects.ts".to_string()));
        assert!(paths.contains(&"ios/Colors.swift".to_string()));
        assert!(paths.contains(&"ios/Spacing.swift".to_string()));
        assert!(paths.contains(&"tokens.json".to_string()));
    }

    #[test]
    fn test_snapshot_round_trips_through_store() {
        let store = extracted_store();
        let json = render_snapshot(&store).unwrap();

        let reparsed: TokenStore = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, store);
    }

    #[test]
    fn test_placeholder_store_renders_nothing() {
        let store = TokenStore::placeholder();

        assert!(matches!(
            render_snapshot(&store),
            Err(CodegenError::PlaceholderToken { .. })
        ));
        assert!(matches!(
            render_all(&store),
            Err(CodegenError::PlaceholderToken { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_all_writes_every_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let files = render_all(&extracted_store()).unwrap();

        let report = write_all(&files, dir.path()).await;

        assert!(report.all_succeeded());
        assert_eq!(report.written.len(), files.len());
        for file in &files {
            let on_disk = tokio::fs::read_to_string(dir.path().join(&file.relative_path))
                .await
                .unwrap();
            assert_eq!(on_disk, file.contents);
        }
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated_per_file() {
        let dir = tempfile::TempDir::new().unwrap();

        // A directory squatting on the target path makes that one file
        // fail while its sibling still writes.
        tokio::fs::create_dir_all(dir.path().join("blocked.ts"))
            .await
            .unwrap();

        let files = vec![
            RenderedFile {
                relative_path: PathBuf::from("blocked.ts"),
                contents: "export const x = 1;\n".to_string(),
            },
            RenderedFile {
                relative_path: PathBuf::from("ok.ts"),
                contents: "export const y = 2;\n".to_string(),
            },
        ];

        let report = write_all(&files, dir.path()).await;

        assert!(!report.all_succeeded());
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("blocked.ts"));
        assert!(
            tokio::fs::read_to_string(dir.path().join("ok.ts"))
                .await
                .is_ok()
        );
    }
}
