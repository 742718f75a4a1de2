//! Token extraction
//!
//! Flattens the Figma variables payload into a [`RawTokenCollection`]: each
//! variable becomes one flat-named raw token tagged with its category, with
//! alias variables resolved to their target value. Also provides the
//! built-in simulated dataset used when placeholder mode is explicitly
//! allowed.

use crate::client::{
    FigmaClient, FigmaClientError, FigmaVariable, FigmaVariableValue, Result, VariablesMeta,
};
use chrono::Utc;
use std::collections::BTreeMap;
use token_store::{ExtractionMetadata, RawToken, RawTokenCollection, TokenCategory, TokenValue};

/// Leaf keys whose numeric values carry a pixel unit
///
/// Other numeric leaves (font weights, line-height ratios) stay bare.
const PX_LEAF_KEYS: &[&str] = &["blur", "fontSize", "offsetX", "offsetY", "radius", "spread"];

impl FigmaClient {
    /// Extract all design tokens from the configured Figma file
    ///
    /// Performs two API calls (file metadata, local variables) and flattens
    /// the variables into raw tokens. Variables outside the four known
    /// category prefixes are skipped with a warning.
    pub async fn extract_tokens(&self) -> Result<RawTokenCollection> {
        let file_meta = self.fetch_file_meta().await?;
        let variables = self.fetch_local_variables().await?;

        let tokens = flatten_variables(&variables)?;
        tracing::info!(
            "Extracted {} tokens from Figma file {} (version {})",
            tokens.len(),
            self.file_id(),
            file_meta.version
        );

        let metadata = ExtractionMetadata {
            figma_file_id: self.file_id().to_string(),
            extracted_at: Utc::now(),
            token_count: tokens.len(),
            version: file_meta.version,
        };
        Ok(RawTokenCollection { tokens, metadata })
    }
}

/// Flatten the variables payload into raw tokens
///
/// Variable names are slash paths. The first segment selects the category
/// (`color`, `spacing`, `typography`, `effect`); the remaining segments are
/// joined with hyphens into the flat token name. Typography and effect
/// variables use their second segment as the token name and their last
/// segment as a composite key, so `typography/heading/fontSize` contributes
/// the `fontSize` entry of the `heading` token.
pub fn flatten_variables(meta: &VariablesMeta) -> Result<Vec<RawToken>> {
    let mut sorted: Vec<&FigmaVariable> = meta.variables.values().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut tokens: Vec<RawToken> = Vec::new();
    let mut composites: BTreeMap<(TokenCategory, String), BTreeMap<String, TokenValue>> =
        BTreeMap::new();

    for variable in sorted {
        let segments: Vec<&str> = variable.name.split('/').collect();
        let category = match segments[0] {
            "color" => TokenCategory::Color,
            "spacing" => TokenCategory::Spacing,
            "typography" => TokenCategory::Typography,
            "effect" => TokenCategory::Effect,
            other => {
                tracing::warn!("Skipping variable '{}' with unknown prefix '{other}'", variable.name);
                continue;
            }
        };
        if segments.len() < 2 {
            tracing::warn!("Skipping variable '{}' with no name segments", variable.name);
            continue;
        }

        let Some(value) = default_mode_value(meta, variable) else {
            tracing::warn!("Skipping variable '{}' with no default-mode value", variable.name);
            continue;
        };

        match category {
            TokenCategory::Color | TokenCategory::Spacing => {
                // Spacing keeps its category prefix in the flat name; the
                // transform step strips it again.
                let name = if category == TokenCategory::Spacing {
                    format!("spacing-{}", segments[1..].join("-"))
                } else {
                    segments[1..].join("-")
                };
                let (token_value, alias_of) = resolve_leaf(meta, variable, value)?;
                let mut token = RawToken::new(name, category, token_value);
                token.figma_id = Some(variable.id.clone());
                if !variable.description.is_empty() {
                    token.description = Some(variable.description.clone());
                }
                token.alias_of = alias_of;
                tokens.push(token);
            }
            TokenCategory::Typography | TokenCategory::Effect => {
                // Leaf variables group into one composite token per style.
                if segments.len() < 3 {
                    tracing::warn!(
                        "Skipping composite variable '{}' without a leaf segment",
                        variable.name
                    );
                    continue;
                }
                let token_name = segments[1..segments.len() - 1].join("-");
                let leaf_key = segments[segments.len() - 1].to_string();
                let (leaf_value, _) = resolve_leaf(meta, variable, value)?;
                composites
                    .entry((category, token_name))
                    .or_default()
                    .insert(leaf_key, leaf_value);
            }
        }
    }

    for ((category, name), map) in composites {
        tokens.push(RawToken::new(name, category, TokenValue::Composite(map)));
    }
    Ok(tokens)
}

/// Value of a variable in its collection's default mode
fn default_mode_value<'a>(
    meta: &'a VariablesMeta,
    variable: &'a FigmaVariable,
) -> Option<&'a FigmaVariableValue> {
    let collection = meta.variable_collections.get(&variable.variable_collection_id)?;
    variable.values_by_mode.get(&collection.default_mode_id)
}

/// Resolve one variable value into a scalar token value
///
/// Aliases are followed one level to their target variable; the returned
/// pair carries the resolved value and, for aliases, the flat name of the
/// target token.
fn resolve_leaf(
    meta: &VariablesMeta,
    variable: &FigmaVariable,
    value: &FigmaVariableValue,
) -> Result<(TokenValue, Option<String>)> {
    match value {
        FigmaVariableValue::Alias { id, .. } => {
            let target = meta.variables.get(id).ok_or_else(|| {
                FigmaClientError::MalformedResponse(format!(
                    "variable '{}' aliases unknown variable id {id}",
                    variable.name
                ))
            })?;
            let target_value = default_mode_value(meta, target).ok_or_else(|| {
                FigmaClientError::MalformedResponse(format!(
                    "alias target '{}' has no default-mode value",
                    target.name
                ))
            })?;
            if matches!(target_value, FigmaVariableValue::Alias { .. }) {
                return Err(FigmaClientError::MalformedResponse(format!(
                    "variable '{}' aliases another alias '{}'",
                    variable.name, target.name
                )));
            }
            let (resolved, _) = resolve_leaf(meta, target, target_value)?;
            let target_flat = target.name.split('/').skip(1).collect::<Vec<_>>().join("-");
            Ok((resolved, Some(target_flat)))
        }
        FigmaVariableValue::Color { r, g, b, a } => {
            Ok((TokenValue::scalar(rgba_to_hex(*r, *g, *b, *a)), None))
        }
        FigmaVariableValue::Number(n) => {
            Ok((TokenValue::scalar(format_number(&variable.name, *n)), None))
        }
        FigmaVariableValue::Text(text) => Ok((TokenValue::scalar(text.clone()), None)),
    }
}

/// Convert 0..=1 color components to a lowercase hex string
///
/// Fully opaque colors render as 6 digits; translucent colors carry the
/// alpha byte.
fn rgba_to_hex(r: f64, g: f64, b: f64, a: f64) -> String {
    let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    if a >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            to_byte(r),
            to_byte(g),
            to_byte(b),
            to_byte(a)
        )
    }
}

/// Format a numeric leaf as its string token value
///
/// Dimension leaves ([`PX_LEAF_KEYS`] and all spacing values) get the `px`
/// suffix; ratios and weights stay bare. Whole numbers drop the fraction.
fn format_number(variable_name: &str, n: f64) -> String {
    let bare = if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    };
    let leaf_key = variable_name.rsplit('/').next().unwrap_or_default();
    if PX_LEAF_KEYS.contains(&leaf_key) || variable_name.starts_with("spacing/") {
        format!("{bare}px")
    } else {
        bare
    }
}

// =============================================================================
// Simulated Dataset
// =============================================================================

/// The built-in development dataset
///
/// Used only when the caller explicitly opts into placeholder mode (no
/// Figma credentials). Values mirror the committed Meridian palette so the
/// rest of the pipeline behaves exactly as with a real extraction; the
/// metadata version is marked `"simulated"` so downstream tooling can tell
/// the difference.
pub fn simulated_collection() -> RawTokenCollection {
    let mut tokens = Vec::new();

    let palette: &[(&str, [(&str, &str); 5])] = &[
        (
            "green",
            [
                ("100", "#dcfce7"),
                ("300", "#86efac"),
                ("500", "#22c55e"),
                ("700", "#15803d"),
                ("900", "#14532d"),
            ],
        ),
        (
            "neutral",
            [
                ("100", "#f3f4f6"),
                ("300", "#d1d5db"),
                ("500", "#6b7280"),
                ("700", "#374151"),
                ("900", "#111827"),
            ],
        ),
        (
            "primary",
            [
                ("100", "#dbeafe"),
                ("300", "#93c5fd"),
                ("500", "#3b82f6"),
                ("700", "#1d4ed8"),
                ("900", "#1e3a8a"),
            ],
        ),
        (
            "red",
            [
                ("100", "#fee2e2"),
                ("300", "#fca5a5"),
                ("500", "#ef4444"),
                ("700", "#b91c1c"),
                ("900", "#7f1d1d"),
            ],
        ),
    ];
    for (hue, shades) in palette {
        for (shade, hex) in shades {
            tokens.push(RawToken::new(
                format!("{hue}-{shade}"),
                TokenCategory::Color,
                TokenValue::scalar(*hex),
            ));
        }
    }

    for (name, reference, hex) in [
        ("semantic-accent", "primary-500", "#3b82f6"),
        ("semantic-danger", "red-500", "#ef4444"),
        ("semantic-success", "green-500", "#22c55e"),
    ] {
        tokens.push(
            RawToken::new(name, TokenCategory::Color, TokenValue::scalar(hex)).alias_of(reference),
        );
    }

    for (name, value) in [
        ("spacing-xs", "4px"),
        ("spacing-sm", "8px"),
        ("spacing-md", "16px"),
        ("spacing-lg", "24px"),
        ("spacing-xl", "32px"),
    ] {
        tokens.push(RawToken::new(
            name,
            TokenCategory::Spacing,
            TokenValue::scalar(value),
        ));
    }

    for (name, family, size, weight, line_height) in [
        ("heading", "Inter", "24px", "600", "1.25"),
        ("body", "Inter", "16px", "400", "1.5"),
        ("caption", "Inter", "12px", "400", "1.375"),
    ] {
        tokens.push(RawToken::new(
            name,
            TokenCategory::Typography,
            TokenValue::composite([
                ("fontFamily", family),
                ("fontSize", size),
                ("fontWeight", weight),
                ("lineHeight", line_height),
            ]),
        ));
    }

    for (name, offset_y, blur, spread, color) in [
        ("shadow-sm", "1px", "2px", "0px", "rgba(0, 0, 0, 0.05)"),
        ("shadow-md", "4px", "6px", "-1px", "rgba(0, 0, 0, 0.1)"),
        ("shadow-lg", "10px", "15px", "-3px", "rgba(0, 0, 0, 0.1)"),
    ] {
        tokens.push(RawToken::new(
            name,
            TokenCategory::Effect,
            TokenValue::composite([
                ("offsetX", "0px"),
                ("offsetY", offset_y),
                ("blur", blur),
                ("spread", spread),
                ("color", color),
            ]),
        ));
    }

    let metadata = ExtractionMetadata {
        figma_file_id: "SIMULATED".to_string(),
        extracted_at: Utc::now(),
        token_count: tokens.len(),
        version: "simulated".to_string(),
    };
    RawTokenCollection { tokens, metadata }
}
