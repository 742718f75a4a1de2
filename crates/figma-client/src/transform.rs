//! Token transformation
//!
//! The pure reshaping step between extraction and code generation: turns
//! the flat [`RawTokenCollection`] into nested [`CategoryMaps`]. No IO and
//! no network; everything here is deterministic and unit-testable.

use thiserror::Error;
use token_store::{CategoryMaps, RawTokenCollection, SemanticToken, TokenCategory};

/// Prefix marking a raw color token as a semantic alias
pub const SEMANTIC_PREFIX: &str = "semantic-";

/// Prefix stripped from raw spacing token names
pub const SPACING_PREFIX: &str = "spacing-";

/// Errors that can occur while reshaping raw tokens
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A color name with no hyphen cannot be split into hue and shade
    #[error("Malformed color name '{name}': expected 'hue-shade' with at least one hyphen")]
    MalformedColorName {
        /// The offending token name
        name: String,
    },

    /// A semantic token does not resolve to a known primitive
    #[error("Semantic token '{name}' does not resolve to a primitive: {reason}")]
    DanglingSemanticReference {
        /// The semantic token name
        name: String,
        /// Why resolution failed
        reason: String,
    },
}

/// Result type for transformation
pub type Result<T> = std::result::Result<T, TransformError>;

/// Reshape a flat raw token list into nested category maps
///
/// - Colors split on the **first** hyphen into `(hue, shade)`; everything
///   after that hyphen is the shade key, further hyphens included. A name
///   with no hyphen is rejected. Duplicate `(hue, shade)` pairs overwrite
///   last-writer-wins with a logged warning.
/// - Semantic colors (the `semantic-` prefix) must carry an alias onto an
///   existing primitive; their stored value is the primitive's value, so
///   the alias cannot drift at creation time.
/// - Spacing names lose the `spacing-` prefix; a name without the prefix
///   is kept whole.
/// - Typography and effects are inserted by full name with their composite
///   values unchanged.
pub fn transform_tokens(collection: &RawTokenCollection) -> Result<CategoryMaps> {
    let mut maps = CategoryMaps::default();

    // Primitives first; semantic aliases resolve against them below.
    for token in collection.by_category(TokenCategory::Color) {
        if token.name.starts_with(SEMANTIC_PREFIX) {
            continue;
        }
        let (hue, shade) =
            token
                .name
                .split_once('-')
                .ok_or_else(|| TransformError::MalformedColorName {
                    name: token.name.clone(),
                })?;
        let shades = maps.colors.entry(hue.to_string()).or_default();
        if shades.insert(shade.to_string(), token.value.clone()).is_some() {
            tracing::warn!("Duplicate color token '{}': keeping the later value", token.name);
        }
    }

    for token in collection.by_category(TokenCategory::Color) {
        let Some(name) = token.name.strip_prefix(SEMANTIC_PREFIX) else {
            continue;
        };
        let reference =
            token
                .alias_of
                .as_deref()
                .ok_or_else(|| TransformError::DanglingSemanticReference {
                    name: token.name.clone(),
                    reason: "no alias reference".to_string(),
                })?;
        let primitive = reference
            .split_once('-')
            .and_then(|(hue, shade)| maps.colors.get(hue)?.get(shade))
            .ok_or_else(|| TransformError::DanglingSemanticReference {
                name: token.name.clone(),
                reason: format!("references unknown primitive '{reference}'"),
            })?;
        if *primitive != token.value {
            tracing::warn!(
                "Semantic token '{}' was extracted with a value that differs from '{reference}'; \
                 using the primitive value",
                token.name
            );
        }
        maps.semantics.insert(
            name.to_string(),
            SemanticToken {
                reference: reference.to_string(),
                value: primitive.clone(),
            },
        );
    }

    for token in collection.by_category(TokenCategory::Spacing) {
        let name = token.name.strip_prefix(SPACING_PREFIX).unwrap_or(&token.name);
        maps.spacing.insert(name.to_string(), token.value.clone());
    }

    for token in collection.by_category(TokenCategory::Typography) {
        maps.typography.insert(token.name.clone(), token.value.clone());
    }

    for token in collection.by_category(TokenCategory::Effect) {
        maps.effects.insert(token.name.clone(), token.value.clone());
    }

    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use token_store::{ExtractionMetadata, RawToken, TokenValue};

    fn collection(tokens: Vec<RawToken>) -> RawTokenCollection {
        let metadata = ExtractionMetadata {
            figma_file_id: "FILE123".to_string(),
            extracted_at: Utc::now(),
            token_count: tokens.len(),
            version: "1".to_string(),
        };
        RawTokenCollection { tokens, metadata }
    }

    #[test]
    fn test_happy_path_color() {
        let maps = transform_tokens(&collection(vec![RawToken::new(
            "primary-500",
            TokenCategory::Color,
            TokenValue::scalar("#3b82f6"),
        )]))
        .unwrap();

        assert_eq!(
            maps.colors["primary"]["500"],
            TokenValue::scalar("#3b82f6")
        );
    }

    #[test]
    fn test_hyphenless_color_name_fails() {
        let err = transform_tokens(&collection(vec![RawToken::new(
            "brand",
            TokenCategory::Color,
            TokenValue::scalar("#000"),
        )]))
        .unwrap_err();

        assert_eq!(
            err,
            TransformError::MalformedColorName { name: "brand".to_string() }
        );
    }

    #[test]
    fn test_multi_hyphen_shade_keeps_remainder() {
        // Only the first hyphen delimits; the rest belongs to the shade.
        let maps = transform_tokens(&collection(vec![RawToken::new(
            "brand-blue-500",
            TokenCategory::Color,
            TokenValue::scalar("#1e40af"),
        )]))
        .unwrap();

        assert_eq!(
            maps.colors["brand"]["blue-500"],
            TokenValue::scalar("#1e40af")
        );
    }

    #[test]
    fn test_duplicate_color_is_last_writer_wins() {
        let maps = transform_tokens(&collection(vec![
            RawToken::new("primary-500", TokenCategory::Color, TokenValue::scalar("#111111")),
            RawToken::new("primary-500", TokenCategory::Color, TokenValue::scalar("#222222")),
        ]))
        .unwrap();

        assert_eq!(maps.colors["primary"]["500"], TokenValue::scalar("#222222"));
    }

    #[test]
    fn test_spacing_prefix_stripped() {
        let maps = transform_tokens(&collection(vec![
            RawToken::new("spacing-md", TokenCategory::Spacing, TokenValue::scalar("16px")),
            RawToken::new("gutter", TokenCategory::Spacing, TokenValue::scalar("20px")),
        ]))
        .unwrap();

        assert_eq!(maps.spacing["md"], TokenValue::scalar("16px"));
        // A name without the prefix is kept whole.
        assert_eq!(maps.spacing["gutter"], TokenValue::scalar("20px"));
    }

    #[test]
    fn test_semantic_alias_resolves() {
        let maps = transform_tokens(&collection(vec![
            RawToken::new("red-500", TokenCategory::Color, TokenValue::scalar("#ef4444")),
            RawToken::new("semantic-danger", TokenCategory::Color, TokenValue::scalar("#ef4444"))
                .alias_of("red-500"),
        ]))
        .unwrap();

        let danger = &maps.semantics["danger"];
        assert_eq!(danger.reference, "red-500");
        assert_eq!(danger.value, maps.colors["red"]["500"]);
    }

    #[test]
    fn test_semantic_without_alias_fails() {
        let err = transform_tokens(&collection(vec![RawToken::new(
            "semantic-danger",
            TokenCategory::Color,
            TokenValue::scalar("#ef4444"),
        )]))
        .unwrap_err();

        assert!(matches!(err, TransformError::DanglingSemanticReference { .. }));
    }

    #[test]
    fn test_semantic_unknown_primitive_fails() {
        let err = transform_tokens(&collection(vec![RawToken::new(
            "semantic-danger",
            TokenCategory::Color,
            TokenValue::scalar("#ef4444"),
        )
        .alias_of("red-500")]))
        .unwrap_err();

        assert_eq!(
            err,
            TransformError::DanglingSemanticReference {
                name: "semantic-danger".to_string(),
                reason: "references unknown primitive 'red-500'".to_string(),
            }
        );
    }

    #[test]
    fn test_typography_and_effects_keep_composites() {
        let body = TokenValue::composite([("fontFamily", "Inter"), ("fontSize", "16px")]);
        let shadow = TokenValue::composite([("blur", "2px"), ("color", "rgba(0, 0, 0, 0.05)")]);

        let maps = transform_tokens(&collection(vec![
            RawToken::new("body", TokenCategory::Typography, body.clone()),
            RawToken::new("shadow-sm", TokenCategory::Effect, shadow.clone()),
        ]))
        .unwrap();

        assert_eq!(maps.typography["body"], body);
        assert_eq!(maps.effects["shadow-sm"], shadow);
    }

    #[test]
    fn test_simulated_collection_transforms_cleanly() {
        let collection = crate::extract::simulated_collection();
        let maps = transform_tokens(&collection).unwrap();

        assert_eq!(
            maps.category_keys(TokenCategory::Color),
            vec!["green", "neutral", "primary", "red"]
        );
        assert_eq!(maps.semantics.len(), 3);
        assert_eq!(
            maps.category_keys(TokenCategory::Spacing),
            vec!["lg", "md", "sm", "xl", "xs"]
        );
        assert!(!maps.category_has_placeholder(TokenCategory::Color));
    }
}
