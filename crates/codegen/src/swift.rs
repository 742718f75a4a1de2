//! Swift module renderer
//!
//! Renders one category into the module consumed by the iOS client: one
//! `public enum` namespace per category with `static let` members. Token
//! names are transliterated from kebab-case to identifier-safe camelCase,
//! hex colors become `Color(red:green:blue:)` initializers, and
//! px-suffixed dimension strings become bare `CGFloat` literals. A value
//! that cannot be converted fails the render; nothing is ever coerced to
//! `NaN` or emitted half-parsed.

use crate::error::{CodegenError, Result};
use crate::identifier::{camel_case, export_name, parse_hex_color, parse_px, pascal_case};
use chrono::SecondsFormat;
use std::collections::BTreeMap;
use token_store::{CategoryMaps, TokenCategory, TokenMetadata, TokenValue};

/// Render the Swift module for one category
pub fn render_native_module(
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

    let mut out = String::new();
    out.push_str(&header(export_name(category), metadata));
    out.push_str("import SwiftUI\n\n");

    match category {
        TokenCategory::Color => {
            out.push_str("public enum ColorTokens {\n");
            for (hue, shades) in &maps.colors {
                for (shade, value) in shades {
                    let name = camel_case(&format!("{hue}-{shade}"));
                    out.push_str(&format!("    public static let {name} = {}\n", color_literal(value)?));
                }
            }
            out.push_str("}\n\n");

            out.push_str("public enum SemanticColorTokens {\n");
            for (name, semantic) in &maps.semantics {
                out.push_str(&format!("    /// Aliases {}\n", semantic.reference));
                out.push_str(&format!(
                    "    public static let {} = {}\n",
                    camel_case(name),
                    color_literal(&semantic.value)?
                ));
            }
            out.push_str("}\n");
        }
        TokenCategory::Spacing => {
            out.push_str("public enum SpacingTokens {\n");
            for (name, value) in &maps.spacing {
                let px = parse_px(scalar(value)?)?;
                out.push_str(&format!(
                    "    public static let {}: CGFloat = {px}\n",
                    camel_case(name)
                ));
            }
            out.push_str("}\n");
        }
        TokenCategory::Typography => {
            out.push_str(&composite_namespace("TypographyTokens", &maps.typography)?);
        }
        TokenCategory::Effect => {
            out.push_str(&composite_namespace("EffectTokens", &maps.effects)?);
        }
    }

    Ok(out)
}

/// Render a namespace of nested composite tokens
///
/// Each token becomes an inner enum; px-suffixed leaves become `CGFloat`
/// members, all other leaves stay string members.
fn composite_namespace(
    namespace: &str,
    tokens: &BTreeMap<String, TokenValue>,
) -> Result<String> {
    let mut out = format!("public enum {namespace} {{\n");
    let mut first = true;
    for (name, value) in tokens {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&format!("    public enum {} {{\n", pascal_case(name)));
        match value {
            TokenValue::Composite(leaves) => {
                for (key, leaf) in leaves {
                    let text = scalar(leaf)?;
                    if text.ends_with("px") {
                        out.push_str(&format!(
                            "        public static let {}: CGFloat = {}\n",
                            camel_case(key),
                            parse_px(text)?
                        ));
                    } else {
                        out.push_str(&format!(
                            "        public static let {} = \"{text}\"\n",
                            camel_case(key)
                        ));
                    }
                }
            }
            other => {
                // A flat value in a composite category still renders, as a
                // single `value` member.
                out.push_str(&format!(
                    "        public static let value = \"{}\"\n",
                    scalar(other)?
                ));
            }
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    Ok(out)
}

fn color_literal(value: &TokenValue) -> Result<String> {
    let text = scalar(value)?;
    let (r, g, b, a) = parse_hex_color(text)?;
    Ok(match a {
        Some(a) => format!(
            "Color(red: {r:.3}, green: {g:.3}, blue: {b:.3}, opacity: {a:.3})"
        ),
        None => format!("Color(red: {r:.3}, green: {g:.3}, blue: {b:.3})"),
    })
}

fn scalar(value: &TokenValue) -> Result<&str> {
    value.as_scalar().ok_or_else(|| {
        CodegenError::Serialization("expected a scalar token value".to_string())
    })
}

fn header(name: &str, metadata: &TokenMetadata) -> String {
    let synced = metadata
        .last_sync
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "never".to_string());
    format!(
        "// Meridian design tokens: {name}.\n\
         // Generated from Figma file {file} (version {version}), synced {synced}.\n\
         // Do not edit by hand; run extract-tokens to regenerate.\n\n",
        file = metadata.figma_file_id,
        version = metadata.version,
    )
}
