//! Token schema types
//!
//! This module defines the raw extraction types produced by the Figma
//! extractor and the nested category maps the rest of the pipeline operates
//! on. Raw tokens form a flat list; the transformation step reshapes them
//! into per-category maps (two-level for colors, flat for spacing, named
//! composites for typography and effects).

use crate::value::TokenValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Categories
// =============================================================================

/// The four token categories the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenCategory {
    /// Color primitives and semantic aliases
    Color,
    /// Spacing scale (unit-suffixed pixel strings)
    Spacing,
    /// Typography styles (composite values)
    Typography,
    /// Effects such as shadows (composite values)
    Effect,
}

impl TokenCategory {
    /// All categories, in stable order
    pub fn all() -> [TokenCategory; 4] {
        [
            TokenCategory::Color,
            TokenCategory::Spacing,
            TokenCategory::Typography,
            TokenCategory::Effect,
        ]
    }

    /// Lowercase name used in reports and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Typography => "typography",
            TokenCategory::Effect => "effect",
        }
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Raw Extraction Types
// =============================================================================

/// A single token as extracted from Figma, before transformation
///
/// Raw token names are flat: colors are `"hue-shade"` (e.g. `"primary-500"`),
/// semantic colors carry the `"semantic-"` prefix, spacing tokens carry the
/// `"spacing-"` prefix. Typography and effect tokens already carry their
/// composite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToken {
    /// Flat token name
    pub name: String,
    /// Token category
    pub category: TokenCategory,
    /// Token value
    pub value: TokenValue,
    /// Optional description from the design tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Figma-side identifier, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figma_id: Option<String>,
    /// For alias tokens, the flat name of the referenced primitive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

impl RawToken {
    /// Create a raw token with no description, id, or alias
    pub fn new(name: impl Into<String>, category: TokenCategory, value: TokenValue) -> Self {
        Self {
            name: name.into(),
            category,
            value,
            description: None,
            figma_id: None,
            alias_of: None,
        }
    }

    /// Set the alias target (semantic tokens)
    pub fn alias_of(mut self, reference: impl Into<String>) -> Self {
        self.alias_of = Some(reference.into());
        self
    }
}

/// Metadata stamped on one extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    /// Source Figma file id
    pub figma_file_id: String,
    /// When the extraction ran
    pub extracted_at: DateTime<Utc>,
    /// Number of tokens extracted
    pub token_count: usize,
    /// Figma document version, or `"simulated"` for the built-in dataset
    pub version: String,
}

/// A full extraction result: the flat token list plus run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenCollection {
    /// Flat list of extracted tokens
    pub tokens: Vec<RawToken>,
    /// Extraction run metadata
    pub metadata: ExtractionMetadata,
}

impl RawTokenCollection {
    /// All tokens in a given category
    pub fn by_category(&self, category: TokenCategory) -> impl Iterator<Item = &RawToken> {
        self.tokens.iter().filter(move |t| t.category == category)
    }
}

// =============================================================================
// Category Maps
// =============================================================================

/// A semantic color token: an alias onto a primitive
///
/// `reference` names the primitive as `"hue-shade"`; `value` is the resolved
/// primitive value at extraction time. The validator asserts these never
/// drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticToken {
    /// Flat name of the referenced primitive (e.g. `"red-500"`)
    pub reference: String,
    /// Resolved value of the referenced primitive
    pub value: TokenValue,
}

/// All token categories reshaped into their nested map forms
///
/// Colors are two-level (`hue -> shade -> value`); spacing is flat;
/// typography and effects are named composites. Maps are `BTreeMap`s so
/// that serialization and rendering order is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMaps {
    /// Color primitives: hue -> shade -> value
    pub colors: BTreeMap<String, BTreeMap<String, TokenValue>>,
    /// Semantic color aliases
    pub semantics: BTreeMap<String, SemanticToken>,
    /// Spacing scale, keyed by prefix-stripped name
    pub spacing: BTreeMap<String, TokenValue>,
    /// Typography styles, keyed by name
    pub typography: BTreeMap<String, TokenValue>,
    /// Effects, keyed by name
    pub effects: BTreeMap<String, TokenValue>,
}

impl CategoryMaps {
    /// The all-placeholder initial state
    ///
    /// Carries the canonical Meridian token structure (hues, spacing tiers,
    /// typography styles, effects) with every leaf set to the placeholder,
    /// so the structure of the committed files is stable before the first
    /// real extraction.
    pub fn placeholder() -> Self {
        let mut maps = CategoryMaps::default();

        for hue in ["green", "neutral", "primary", "red"] {
            let shades = ["100", "300", "500", "700", "900"]
                .into_iter()
                .map(|shade| (shade.to_string(), TokenValue::Placeholder))
                .collect();
            maps.colors.insert(hue.to_string(), shades);
        }

        for (name, reference) in [
            ("accent", "primary-500"),
            ("danger", "red-500"),
            ("success", "green-500"),
        ] {
            maps.semantics.insert(
                name.to_string(),
                SemanticToken {
                    reference: reference.to_string(),
                    value: TokenValue::Placeholder,
                },
            );
        }

        for name in ["xs", "sm", "md", "lg", "xl"] {
            maps.spacing.insert(name.to_string(), TokenValue::Placeholder);
        }

        for name in ["body", "caption", "heading"] {
            maps.typography.insert(name.to_string(), TokenValue::Placeholder);
        }

        for name in ["shadow-lg", "shadow-md", "shadow-sm"] {
            maps.effects.insert(name.to_string(), TokenValue::Placeholder);
        }

        maps
    }

    /// Total number of tokens across all categories
    ///
    /// Colors count per shade; semantics, spacing, typography, and effects
    /// count per named token.
    pub fn token_count(&self) -> usize {
        let color_count: usize = self.colors.values().map(BTreeMap::len).sum();
        color_count
            + self.semantics.len()
            + self.spacing.len()
            + self.typography.len()
            + self.effects.len()
    }

    /// Top-level keys for a category (used by the hierarchy check)
    pub fn category_keys(&self, category: TokenCategory) -> Vec<String> {
        match category {
            TokenCategory::Color => self.colors.keys().cloned().collect(),
            TokenCategory::Spacing => self.spacing.keys().cloned().collect(),
            TokenCategory::Typography => self.typography.keys().cloned().collect(),
            TokenCategory::Effect => self.effects.keys().cloned().collect(),
        }
    }

    /// Every leaf value in a category as `(path, leaf)` pairs
    ///
    /// Placeholder leaves are `None`. Semantic aliases are reported under
    /// the color category with a `semantic.` path prefix.
    pub fn category_leaves(&self, category: TokenCategory) -> Vec<(String, Option<&str>)> {
        let mut out = Vec::new();
        match category {
            TokenCategory::Color => {
                for (hue, shades) in &self.colors {
                    for (shade, value) in shades {
                        value.leaves(&format!("{hue}.{shade}"), &mut out);
                    }
                }
                for (name, semantic) in &self.semantics {
                    semantic.value.leaves(&format!("semantic.{name}"), &mut out);
                }
            }
            TokenCategory::Spacing => {
                for (name, value) in &self.spacing {
                    value.leaves(name, &mut out);
                }
            }
            TokenCategory::Typography => {
                for (name, value) in &self.typography {
                    value.leaves(name, &mut out);
                }
            }
            TokenCategory::Effect => {
                for (name, value) in &self.effects {
                    value.leaves(name, &mut out);
                }
            }
        }
        out
    }

    /// Path of the first placeholder leaf in a category, if any
    ///
    /// Scalar leaves containing the sentinel substring count as
    /// placeholders too.
    pub fn first_placeholder_path(&self, category: TokenCategory) -> Option<String> {
        self.category_leaves(category)
            .into_iter()
            .find(|(_, leaf)| match leaf {
                None => true,
                Some(text) => text.contains(crate::value::PLACEHOLDER_SENTINEL),
            })
            .map(|(path, _)| path)
    }

    /// Check whether a category still contains any placeholder leaf
    pub fn category_has_placeholder(&self, category: TokenCategory) -> bool {
        self.first_placeholder_path(category).is_some()
    }
}
