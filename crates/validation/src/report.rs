//! Report aggregation
//!
//! Collects check results into one report: pass/fail/warning counts, a
//! human-readable rendering grouped by category, a JSON serialization for
//! CI consumption, and the derived process exit code.

use crate::checks::{CheckStatus, ValidationResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated outcome of one validation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Number of passed checks
    pub passed: usize,
    /// Number of failed checks
    pub failed: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Every individual result
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Aggregate a list of check results
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let passed = results.iter().filter(|r| r.status == CheckStatus::Pass).count();
        let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
        let warnings = results.iter().filter(|r| r.status == CheckStatus::Warning).count();
        Self {
            passed,
            failed,
            warnings,
            results,
        }
    }

    /// Process exit code: 0 only when no check failed
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }

    /// Render the human-readable report, grouped by category
    pub fn render(&self) -> String {
        let mut grouped: BTreeMap<&str, Vec<&ValidationResult>> = BTreeMap::new();
        for result in &self.results {
            grouped.entry(result.category.as_str()).or_default().push(result);
        }

        let mut out = String::from("Token validation report\n=======================\n");
        for (category, results) in grouped {
            out.push_str(&format!("\n[{category}]\n"));
            for result in results {
                let mark = match result.status {
                    CheckStatus::Pass => "PASS",
                    CheckStatus::Fail => "FAIL",
                    CheckStatus::Warning => "WARN",
                };
                out.push_str(&format!("  {mark}  {:<22} {}\n", result.check, result.message));
                if let Some(expected) = &result.expected {
                    out.push_str(&format!("          expected: {expected}\n"));
                }
                if let Some(actual) = &result.actual {
                    out.push_str(&format!("          actual:   {actual}\n"));
                }
                if let Some(fix) = &result.fix {
                    out.push_str(&format!("          fix:      {fix}\n"));
                }
            }
        }

        out.push_str(&format!(
            "\n{} passed, {} failed, {} warnings\n",
            self.passed, self.failed, self.warnings
        ));
        out
    }

    /// Serialize the report for CI consumption
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
