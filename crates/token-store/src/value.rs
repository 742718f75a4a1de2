//! Token value representation
//!
//! A token value is either a real design value or an explicit placeholder.
//! The placeholder state is a distinct enum variant in memory, so code that
//! consumes tokens cannot confuse an unextracted token with a real one. On
//! the wire (the JSON snapshot) a placeholder serializes to the reserved
//! sentinel string, which keeps the snapshot scannable by the leakage check.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved sentinel marking a token as not yet extracted from Figma
///
/// This string must never appear in generated output. The code generators
/// refuse to render any map containing it, and the validator scans every
/// leaf value for it.
pub const PLACEHOLDER_SENTINEL: &str = "FIGMA_TOKEN_REQUIRED";

/// A single design-token value
///
/// Scalar values carry color hex strings and unit-suffixed dimension strings
/// (e.g. `"#3b82f6"`, `"16px"`). Composite values carry the nested string
/// maps used by typography and effect tokens.
///
/// # Examples
/// ```
/// use token_store::TokenValue;
///
/// let color = TokenValue::scalar("#3b82f6");
/// assert_eq!(color.as_scalar(), Some("#3b82f6"));
/// assert!(!color.contains_placeholder());
/// assert!(TokenValue::Placeholder.contains_placeholder());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Not yet extracted; serializes to [`PLACEHOLDER_SENTINEL`]
    Placeholder,
    /// A single string value
    Scalar(String),
    /// A nested map of named values (typography, effects)
    Composite(BTreeMap<String, TokenValue>),
}

impl TokenValue {
    /// Create a scalar value
    pub fn scalar(value: impl Into<String>) -> Self {
        TokenValue::Scalar(value.into())
    }

    /// Create a composite value from (key, scalar) pairs
    pub fn composite<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        TokenValue::Composite(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), TokenValue::Scalar(v.into())))
                .collect(),
        )
    }

    /// Get the scalar string, if this is a scalar value
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            TokenValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Check whether this value or any nested value is a placeholder
    ///
    /// Scalar values are also checked for the sentinel substring, so a
    /// sentinel smuggled in through deserialized text is still detected.
    pub fn contains_placeholder(&self) -> bool {
        match self {
            TokenValue::Placeholder => true,
            TokenValue::Scalar(value) => value.contains(PLACEHOLDER_SENTINEL),
            TokenValue::Composite(map) => map.values().any(TokenValue::contains_placeholder),
        }
    }

    /// Collect every leaf value under this node as `(path, leaf)` pairs
    ///
    /// Paths are dot-joined from `prefix` (e.g. `"heading.fontSize"`).
    /// Placeholder leaves are reported as `None`.
    pub fn leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, Option<&'a str>)>) {
        match self {
            TokenValue::Placeholder => out.push((prefix.to_string(), None)),
            TokenValue::Scalar(value) => out.push((prefix.to_string(), Some(value))),
            TokenValue::Composite(map) => {
                for (key, value) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    value.leaves(&path, out);
                }
            }
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TokenValue::Placeholder => serializer.serialize_str(PLACEHOLDER_SENTINEL),
            TokenValue::Scalar(value) => serializer.serialize_str(value),
            TokenValue::Composite(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TokenValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Map(BTreeMap<String, TokenValue>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) if text == PLACEHOLDER_SENTINEL => Ok(TokenValue::Placeholder),
            Repr::Text(text) => Ok(TokenValue::Scalar(text)),
            Repr::Map(map) => Ok(TokenValue::Composite(map)),
        }
    }
}
