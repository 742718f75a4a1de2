//! TypeScript module renderer
//!
//! Renders one category into the module consumed by the web client: a
//! generated-file header, the serialized value constant, a sibling metadata
//! constant, and derived key-set type aliases. Output is deterministic for
//! identical inputs, so re-running the pipeline with unchanged data leaves
//! committed files byte-identical.

use crate::error::{CodegenError, Result};
use crate::identifier::export_name;
use chrono::SecondsFormat;
use token_store::{CategoryMaps, TokenCategory, TokenMetadata};

/// Render the TypeScript module for one category
pub fn render_module(
    category: TokenCategory,
    maps: &CategoryMaps,
    metadata: &TokenMetadata,
) -> Result<String> {
    if let Some(path) = maps.first_placeholder_path(category) {
        return Err(CodegenError::PlaceholderToken {
            category: category.to_string(),
            path,
        });
    }

    let name = export_name(category);
    let mut out = String::new();
    out.push_str(&header(name, metadata));

    match category {
        TokenCategory::Color => {
            out.push_str(&constant(name, &serde_json::to_string_pretty(&maps.colors)?));
            out.push('\n');
            out.push_str(&constant(
                "semanticColors",
                &serde_json::to_string_pretty(&maps.semantics)?,
            ));
        }
        TokenCategory::Spacing => {
            out.push_str(&constant(name, &serde_json::to_string_pretty(&maps.spacing)?));
        }
        TokenCategory::Typography => {
            out.push_str(&constant(
                name,
                &serde_json::to_string_pretty(&maps.typography)?,
            ));
        }
        TokenCategory::Effect => {
            out.push_str(&constant(name, &serde_json::to_string_pretty(&maps.effects)?));
        }
    }

    out.push('\n');
    out.push_str(&constant(
        &format!("{name}Meta"),
        &serde_json::to_string_pretty(metadata)?,
    ));

    out.push('\n');
    match category {
        TokenCategory::Color => {
            out.push_str("export type ColorHue = keyof typeof colors;\n");
            out.push_str("export type SemanticColorName = keyof typeof semanticColors;\n");
        }
        TokenCategory::Spacing => {
            out.push_str("export type SpacingName = keyof typeof spacing;\n");
        }
        TokenCategory::Typography => {
            out.push_str("export type TypographyStyleName = keyof typeof typography;\n");
        }
        TokenCategory::Effect => {
            out.push_str("export type EffectName = keyof typeof effects;\n");
        }
    }

    Ok(out)
}

fn header(name: &str, metadata: &TokenMetadata) -> String {
    let synced = metadata
        .last_sync
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "never".to_string());
    format!(
        "/**\n\
         \x20* Meridian design tokens: {name}.\n\
         \x20* Generated from Figma file {file} (version {version}), synced {synced}.\n\
         \x20* Do not edit by hand; run extract-tokens to regenerate.\n\
         \x20*/\n\n",
        file = metadata.figma_file_id,
        version = metadata.version,
    )
}

fn constant(name: &str, json: &str) -> String {
    format!("export const {name} = {json} as const;\n")
}
