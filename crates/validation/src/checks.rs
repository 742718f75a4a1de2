//! The consistency checks
//!
//! Each check is a pure function producing one or more
//! [`ValidationResult`]s. Failures are data, not errors: the caller
//! collects every result and derives the exit code from the aggregate, so
//! a single run reports the complete picture.

use serde::Serialize;
use std::collections::BTreeSet;
use token_store::{TokenCategory, TokenMetadata, TokenStore, PLACEHOLDER_SENTINEL};

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    /// Check passed
    Pass,
    /// Check failed; the run exits non-zero
    Fail,
    /// Suspicious but not fatal
    Warning,
}

/// One check outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Category the check ran against
    pub category: String,
    /// Which check produced this result
    pub check: String,
    /// Outcome
    pub status: CheckStatus,
    /// Human-readable description
    pub message: String,
    /// Expected value, when the check compares values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value, when the check compares values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Suggested fix, when one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl ValidationResult {
    fn pass(category: TokenCategory, check: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            check: check.to_string(),
            status: CheckStatus::Pass,
            message: message.into(),
            expected: None,
            actual: None,
            fix: None,
        }
    }

    fn fail(category: TokenCategory, check: &str, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            ..Self::pass(category, check, message)
        }
    }

    /// True when this result is a failure
    pub fn is_fail(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

/// A (semantic token, expected primitive) pair to verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticPair {
    /// Semantic token name
    pub name: String,
    /// Referenced primitive, as `"hue-shade"`
    pub reference: String,
}

// =============================================================================
// Checks
// =============================================================================

/// Exact value equality for one named field
///
/// No fuzzy matching and no tolerance: any difference, including case or
/// whitespace, is a failure. A missing implementation value fails too.
pub fn check_precision(
    category: TokenCategory,
    field: &str,
    expected: &str,
    actual: Option<&str>,
) -> ValidationResult {
    match actual {
        Some(actual) if actual == expected => ValidationResult::pass(
            category,
            "precision",
            format!("'{field}' matches ({expected})"),
        ),
        Some(actual) => {
            let mut result = ValidationResult::fail(
                category,
                "precision",
                format!("'{field}' differs from the Figma snapshot"),
            );
            result.expected = Some(expected.to_string());
            result.actual = Some(actual.to_string());
            result.fix = Some(format!("Set '{field}' to {expected} or re-run extract-tokens"));
            result
        }
        None => {
            let mut result = ValidationResult::fail(
                category,
                "precision",
                format!("'{field}' is missing from the committed tokens"),
            );
            result.expected = Some(expected.to_string());
            result.fix = Some("Re-run extract-tokens to regenerate the committed files".to_string());
            result
        }
    }
}

/// Order-insensitive set equality of structural keys
///
/// Symmetric by construction: swapping the two key lists cannot change
/// the outcome. Failures surface both sorted key lists.
pub fn check_hierarchy(
    category: TokenCategory,
    expected_keys: &[String],
    actual_keys: &[String],
) -> ValidationResult {
    let expected: BTreeSet<&String> = expected_keys.iter().collect();
    let actual: BTreeSet<&String> = actual_keys.iter().collect();

    if expected == actual {
        ValidationResult::pass(
            category,
            "hierarchy",
            format!("Structure matches ({} keys)", expected.len()),
        )
    } else {
        let missing: Vec<&str> = expected.difference(&actual).map(|s| s.as_str()).collect();
        let extra: Vec<&str> = actual.difference(&expected).map(|s| s.as_str()).collect();
        let mut result = ValidationResult::fail(
            category,
            "hierarchy",
            format!(
                "Structure differs: missing [{}], unexpected [{}]",
                missing.join(", "),
                extra.join(", ")
            ),
        );
        result.expected = Some(sorted_list(expected_keys));
        result.actual = Some(sorted_list(actual_keys));
        result
    }
}

fn sorted_list(keys: &[String]) -> String {
    let sorted: BTreeSet<&String> = keys.iter().collect();
    sorted
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scan every committed leaf of a category for the placeholder sentinel
///
/// Any occurrence anywhere is an automatic failure naming the offending
/// token path. This is the strongest guarantee the validator provides and
/// it runs regardless of the other checks' outcomes.
pub fn check_placeholder_leakage(category: TokenCategory, store: &TokenStore) -> ValidationResult {
    let leaked: Vec<String> = store
        .maps
        .category_leaves(category)
        .into_iter()
        .filter(|(_, leaf)| match leaf {
            None => true,
            Some(text) => text.contains(PLACEHOLDER_SENTINEL),
        })
        .map(|(path, _)| path)
        .collect();

    if leaked.is_empty() {
        ValidationResult::pass(category, "placeholder-leakage", "No placeholder values")
    } else {
        let mut result = ValidationResult::fail(
            category,
            "placeholder-leakage",
            format!("Placeholder values leaked at: {}", leaked.join(", ")),
        );
        result.fix = Some("Run extract-tokens with Figma credentials".to_string());
        result
    }
}

/// Verify the semantic layer is a true alias of the primitives
///
/// For each pair, the committed semantic token must exist, must point at
/// the expected primitive, and must carry a value literally equal to that
/// primitive's committed value; a semantic token that drifted into an
/// independent copy fails.
pub fn check_semantic_references(
    pairs: &[SemanticPair],
    store: &TokenStore,
) -> Vec<ValidationResult> {
    pairs
        .iter()
        .map(|pair| {
            let Some(semantic) = store.maps.semantics.get(&pair.name) else {
                return ValidationResult::fail(
                    TokenCategory::Color,
                    "semantic-reference",
                    format!("Semantic token '{}' is missing from the committed tokens", pair.name),
                );
            };
            if semantic.reference != pair.reference {
                let mut result = ValidationResult::fail(
                    TokenCategory::Color,
                    "semantic-reference",
                    format!("Semantic token '{}' references the wrong primitive", pair.name),
                );
                result.expected = Some(pair.reference.clone());
                result.actual = Some(semantic.reference.clone());
                return result;
            }

            let primitive = pair
                .reference
                .split_once('-')
                .and_then(|(hue, shade)| store.maps.colors.get(hue)?.get(shade));
            match primitive {
                Some(primitive) if *primitive == semantic.value => ValidationResult::pass(
                    TokenCategory::Color,
                    "semantic-reference",
                    format!("'{}' aliases '{}'", pair.name, pair.reference),
                ),
                Some(primitive) => {
                    let mut result = ValidationResult::fail(
                        TokenCategory::Color,
                        "semantic-reference",
                        format!(
                            "Semantic token '{}' drifted from its primitive '{}'",
                            pair.name, pair.reference
                        ),
                    );
                    result.expected = primitive.as_scalar().map(str::to_string);
                    result.actual = semantic.value.as_scalar().map(str::to_string);
                    result.fix = Some("Re-run extract-tokens; aliases are resolved at extraction".to_string());
                    result
                }
                None => ValidationResult::fail(
                    TokenCategory::Color,
                    "semantic-reference",
                    format!(
                        "Semantic token '{}' references '{}', which is not a committed primitive",
                        pair.name, pair.reference
                    ),
                ),
            }
        })
        .collect()
}

/// Verify the per-category readiness metadata
///
/// A category whose metadata still says placeholder mode, or whose
/// `isExtracted`/`placeholderMode` flags agree with each other, fails.
pub fn check_readiness(category: TokenCategory, metadata: &TokenMetadata) -> ValidationResult {
    if !metadata.is_consistent() {
        ValidationResult::fail(
            category,
            "readiness",
            format!(
                "Metadata is inconsistent: isExtracted={} and placeholderMode={}",
                metadata.is_extracted, metadata.placeholder_mode
            ),
        )
    } else if metadata.placeholder_mode {
        let mut result = ValidationResult::fail(
            category,
            "readiness",
            "Category is still in placeholder mode",
        );
        result.fix = Some("Run extract-tokens with Figma credentials".to_string());
        result
    } else {
        ValidationResult::pass(
            category,
            "readiness",
            format!("Extracted ({} tokens, version {})", metadata.token_count, metadata.version),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_store::{CategoryMaps, SemanticToken, TokenValue};

    // ==========================================================================
    // Precision
    // ==========================================================================

    #[test]
    fn test_precision_exact_match_passes() {
        let result = check_precision(TokenCategory::Color, "primary.500", "#3b82f6", Some("#3b82f6"));
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_precision_no_tolerance() {
        // Even a case difference fails; there is no fuzzy matching.
        let result = check_precision(TokenCategory::Color, "primary.500", "#3b82f6", Some("#3B82F6"));
        assert!(result.is_fail());
        assert_eq!(result.expected.as_deref(), Some("#3b82f6"));
        assert_eq!(result.actual.as_deref(), Some("#3B82F6"));
    }

    #[test]
    fn test_precision_missing_value_fails() {
        let result = check_precision(TokenCategory::Spacing, "md", "16px", None);
        assert!(result.is_fail());
        assert!(result.message.contains("missing"));
    }

    // ==========================================================================
    // Hierarchy
    // ==========================================================================

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hierarchy_order_insensitive() {
        let result = check_hierarchy(
            TokenCategory::Spacing,
            &keys(&["sm", "md", "lg"]),
            &keys(&["lg", "sm", "md"]),
        );
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_hierarchy_mismatch_surfaces_both_sides() {
        let result = check_hierarchy(
            TokenCategory::Spacing,
            &keys(&["sm", "md", "lg"]),
            &keys(&["sm", "md", "xl"]),
        );
        assert!(result.is_fail());
        assert!(result.message.contains("missing [lg]"));
        assert!(result.message.contains("unexpected [xl]"));
        assert_eq!(result.expected.as_deref(), Some("lg, md, sm"));
        assert_eq!(result.actual.as_deref(), Some("md, sm, xl"));
    }

    #[test]
    fn test_hierarchy_is_symmetric() {
        let a = keys(&["sm", "md"]);
        let b = keys(&["sm", "md", "lg"]);

        let ab = check_hierarchy(TokenCategory::Spacing, &a, &b);
        let ba = check_hierarchy(TokenCategory::Spacing, &b, &a);
        assert_eq!(ab.is_fail(), ba.is_fail());

        let ab = check_hierarchy(TokenCategory::Spacing, &b, &b.clone());
        let ba = check_hierarchy(TokenCategory::Spacing, &b, &b);
        assert_eq!(ab.status, ba.status);
    }

    // ==========================================================================
    // Placeholder Leakage
    // ==========================================================================

    fn store_with(maps: CategoryMaps) -> TokenStore {
        let extraction = token_store::ExtractionMetadata {
            figma_file_id: "FILE123".to_string(),
            extracted_at: chrono::Utc::now(),
            token_count: 0,
            version: "1".to_string(),
        };
        TokenStore::from_extraction(maps, &extraction)
    }

    #[test]
    fn test_leakage_detects_sentinel_in_any_leaf() {
        // Injecting the sentinel at any single leaf must be caught, in
        // every category.
        for category in TokenCategory::all() {
            let mut maps = CategoryMaps::default();
            maps.colors.insert(
                "primary".to_string(),
                [("500".to_string(), TokenValue::scalar("#3b82f6"))].into(),
            );
            maps.spacing.insert("md".to_string(), TokenValue::scalar("16px"));
            maps.typography.insert(
                "body".to_string(),
                TokenValue::composite([("fontFamily", "Inter")]),
            );
            maps.effects.insert(
                "shadow-sm".to_string(),
                TokenValue::composite([("blur", "2px")]),
            );

            match category {
                TokenCategory::Color => {
                    maps.colors.get_mut("primary").unwrap().insert(
                        "900".to_string(),
                        TokenValue::scalar(PLACEHOLDER_SENTINEL),
                    );
                }
                TokenCategory::Spacing => {
                    maps.spacing.insert("xl".to_string(), TokenValue::Placeholder);
                }
                TokenCategory::Typography => {
                    maps.typography.insert(
                        "caption".to_string(),
                        TokenValue::composite([(
                            "fontFamily",
                            format!("{PLACEHOLDER_SENTINEL}_TYPOGRAPHY"),
                        )]),
                    );
                }
                TokenCategory::Effect => {
                    maps.effects.insert("shadow-lg".to_string(), TokenValue::Placeholder);
                }
            }

            let store = store_with(maps);
            let result = check_placeholder_leakage(category, &store);
            assert!(result.is_fail(), "{category} leak not detected");
            assert_eq!(result.category, category.to_string());
        }
    }

    #[test]
    fn test_leakage_clean_category_passes() {
        let mut maps = CategoryMaps::default();
        maps.spacing.insert("md".to_string(), TokenValue::scalar("16px"));
        let store = store_with(maps);

        let result = check_placeholder_leakage(TokenCategory::Spacing, &store);
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_leakage_names_the_offending_path() {
        let mut maps = CategoryMaps::default();
        maps.semantics.insert(
            "danger".to_string(),
            SemanticToken {
                reference: "red-500".to_string(),
                value: TokenValue::Placeholder,
            },
        );
        let store = store_with(maps);

        let result = check_placeholder_leakage(TokenCategory::Color, &store);
        assert!(result.message.contains("semantic.danger"));
    }

    // ==========================================================================
    // Semantic References
    // ==========================================================================

    fn semantic_store(value: &str) -> TokenStore {
        let mut maps = CategoryMaps::default();
        maps.colors.insert(
            "red".to_string(),
            [("500".to_string(), TokenValue::scalar("#ef4444"))].into(),
        );
        maps.semantics.insert(
            "danger".to_string(),
            SemanticToken {
                reference: "red-500".to_string(),
                value: TokenValue::scalar(value),
            },
        );
        store_with(maps)
    }

    fn danger_pair() -> Vec<SemanticPair> {
        vec![SemanticPair {
            name: "danger".to_string(),
            reference: "red-500".to_string(),
        }]
    }

    #[test]
    fn test_semantic_true_alias_passes() {
        let results = check_semantic_references(&danger_pair(), &semantic_store("#ef4444"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, CheckStatus::Pass);
    }

    #[test]
    fn test_semantic_drifted_copy_fails() {
        let results = check_semantic_references(&danger_pair(), &semantic_store("#dc2626"));
        assert!(results[0].is_fail());
        assert_eq!(results[0].expected.as_deref(), Some("#ef4444"));
        assert_eq!(results[0].actual.as_deref(), Some("#dc2626"));
    }

    #[test]
    fn test_semantic_missing_token_fails() {
        let mut store = semantic_store("#ef4444");
        store.maps.semantics.clear();

        let results = check_semantic_references(&danger_pair(), &store);
        assert!(results[0].is_fail());
    }

    #[test]
    fn test_semantic_unknown_primitive_fails() {
        let mut store = semantic_store("#ef4444");
        store.maps.colors.clear();

        let results = check_semantic_references(&danger_pair(), &store);
        assert!(results[0].is_fail());
        assert!(results[0].message.contains("not a committed primitive"));
    }

    // ==========================================================================
    // Readiness
    // ==========================================================================

    #[test]
    fn test_readiness_placeholder_mode_fails() {
        let result = check_readiness(TokenCategory::Color, &TokenMetadata::placeholder());
        assert!(result.is_fail());
    }

    #[test]
    fn test_readiness_inconsistent_flags_fail() {
        let mut metadata = TokenMetadata::placeholder();
        metadata.is_extracted = true;

        let result = check_readiness(TokenCategory::Color, &metadata);
        assert!(result.is_fail());
        assert!(result.message.contains("inconsistent"));
    }
}
