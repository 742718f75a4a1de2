//! Token validation for the Meridian design system
//!
//! Compares the committed token snapshot against the externally authored
//! ground-truth document exported from Figma, and produces a structured
//! pass/fail report. Each run is stateless: load, check, report, exit.
//! Individual check failures are collected rather than thrown, so one
//! invocation surfaces every problem at once; only a missing or malformed
//! ground-truth document aborts immediately.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod report;
pub mod snapshot;

pub use checks::{
    check_hierarchy, check_placeholder_leakage, check_precision, check_readiness,
    check_semantic_references, CheckStatus, SemanticPair, ValidationResult,
};
pub use report::ValidationReport;
pub use snapshot::{load_snapshot, FigmaTokenDocument, SnapshotLoadError};

use token_store::{TokenCategory, TokenStore};

/// Run every check of the committed store against the ground truth
///
/// The five checks are independent and order-irrelevant:
/// value precision, structural hierarchy, placeholder leakage, semantic
/// reference integrity, and per-category readiness metadata.
pub fn run_checks(truth: &FigmaTokenDocument, store: &TokenStore) -> ValidationReport {
    let mut results = Vec::new();

    // Precision: every color shade and spacing value the ground truth
    // names must match the committed value exactly.
    for (hue, shades) in &truth.colors {
        for (shade, expected) in shades {
            let actual = store
                .maps
                .colors
                .get(hue)
                .and_then(|s| s.get(shade))
                .and_then(|v| v.as_scalar());
            results.push(check_precision(
                TokenCategory::Color,
                &format!("{hue}.{shade}"),
                expected,
                actual,
            ));
        }
    }
    for (name, expected) in &truth.spacing {
        let actual = store.maps.spacing.get(name).and_then(|v| v.as_scalar());
        results.push(check_precision(TokenCategory::Spacing, name, expected, actual));
    }

    // Hierarchy: structural key sets per category.
    results.push(check_hierarchy(
        TokenCategory::Color,
        &truth.colors.keys().cloned().collect::<Vec<_>>(),
        &store.maps.category_keys(TokenCategory::Color),
    ));
    results.push(check_hierarchy(
        TokenCategory::Spacing,
        &truth.spacing.keys().cloned().collect::<Vec<_>>(),
        &store.maps.category_keys(TokenCategory::Spacing),
    ));
    results.push(check_hierarchy(
        TokenCategory::Typography,
        &truth.typography.keys().cloned().collect::<Vec<_>>(),
        &store.maps.category_keys(TokenCategory::Typography),
    ));
    results.push(check_hierarchy(
        TokenCategory::Effect,
        &truth.effects.keys().cloned().collect::<Vec<_>>(),
        &store.maps.category_keys(TokenCategory::Effect),
    ));

    // Placeholder leakage: scan every committed leaf in every category.
    for category in TokenCategory::all() {
        results.push(check_placeholder_leakage(category, store));
    }

    // Semantic references: the committed semantic layer must be a true
    // alias of the committed primitives, for every pair the ground truth
    // declares.
    let pairs: Vec<SemanticPair> = truth
        .semantics
        .iter()
        .map(|(name, entry)| SemanticPair {
            name: name.clone(),
            reference: entry.reference.clone(),
        })
        .collect();
    results.extend(check_semantic_references(&pairs, store));

    // Readiness: metadata flags per category.
    for category in TokenCategory::all() {
        results.push(check_readiness(category, &store.category_metadata(category)));
    }

    ValidationReport::from_results(results)
}
