//! Identifier and value conversion helpers
//!
//! Token names are kebab-case on the wire; the Swift dialect needs
//! identifier-safe camelCase and PascalCase forms. Dimension strings carry
//! a `px` suffix that the Swift renderer parses back into bare numbers.

use crate::error::{CodegenError, Result};
use token_store::TokenCategory;

/// Exported constant name for a category (`colors`, `spacing`, ...)
pub fn export_name(category: TokenCategory) -> &'static str {
    match category {
        TokenCategory::Color => "colors",
        TokenCategory::Spacing => "spacing",
        TokenCategory::Typography => "typography",
        TokenCategory::Effect => "effects",
    }
}

/// Convert a kebab-case token name to camelCase
///
/// A name that would start with a digit gets a `token` prefix so the
/// result stays identifier-safe.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').filter(|s| !s.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(segment);
        } else {
            out.push_str(&capitalize(segment));
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out = format!("token{out}");
    }
    out
}

/// Convert a kebab-case token name to PascalCase
pub fn pascal_case(name: &str) -> String {
    capitalize(&camel_case(name))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse an integer pixel string (`"4px"`, `"-1px"`) to its bare number
///
/// Anything else, including other units and unit-less numbers, is rejected
/// with [`CodegenError::UnsupportedUnit`] so a bad value can never reach an
/// output file as `NaN`.
pub fn parse_px(value: &str) -> Result<i64> {
    value
        .strip_suffix("px")
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| CodegenError::UnsupportedUnit {
            value: value.to_string(),
        })
}

/// Parse a `#rrggbb` or `#rrggbbaa` hex color into unit-range components
pub fn parse_hex_color(value: &str) -> Result<(f64, f64, f64, Option<f64>)> {
    let invalid = || CodegenError::InvalidColor {
        value: value.to_string(),
    };

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 && hex.len() != 8 {
        return Err(invalid());
    }
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    let r = byte(0..2)? as f64 / 255.0;
    let g = byte(2..4)? as f64 / 255.0;
    let b = byte(4..6)? as f64 / 255.0;
    let a = if hex.len() == 8 {
        Some(byte(6..8)? as f64 / 255.0)
    } else {
        None
    };
    Ok((r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("shadow-md"), "shadowMd");
        assert_eq!(camel_case("primary-500"), "primary500");
        assert_eq!(camel_case("md"), "md");
        assert_eq!(camel_case("brand-blue-500"), "brandBlue500");
    }

    #[test]
    fn test_camel_case_leading_digit() {
        assert_eq!(camel_case("2xl"), "token2xl");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("shadow-md"), "ShadowMd");
        assert_eq!(pascal_case("body"), "Body");
    }

    #[test]
    fn test_parse_px_accepts_integers() {
        assert_eq!(parse_px("4px").unwrap(), 4);
        assert_eq!(parse_px("-1px").unwrap(), -1);
        assert_eq!(parse_px("0px").unwrap(), 0);
    }

    #[test]
    fn test_parse_px_rejects_other_units() {
        assert!(matches!(parse_px("4rem"), Err(CodegenError::UnsupportedUnit { .. })));
        assert!(matches!(parse_px("4"), Err(CodegenError::UnsupportedUnit { .. })));
        assert!(matches!(parse_px("4.5px"), Err(CodegenError::UnsupportedUnit { .. })));
        assert!(matches!(parse_px("px"), Err(CodegenError::UnsupportedUnit { .. })));
    }

    #[test]
    fn test_parse_hex_color() {
        let (r, g, b, a) = parse_hex_color("#3b82f6").unwrap();
        assert!((r - 59.0 / 255.0).abs() < 1e-9);
        assert!((g - 130.0 / 255.0).abs() < 1e-9);
        assert!((b - 246.0 / 255.0).abs() < 1e-9);
        assert!(a.is_none());

        let (_, _, _, a) = parse_hex_color("#00000080").unwrap();
        assert!((a.unwrap() - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex_color_rejects_short_and_unprefixed() {
        assert!(parse_hex_color("#000").is_err());
        assert!(parse_hex_color("3b82f6").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
    }
}
