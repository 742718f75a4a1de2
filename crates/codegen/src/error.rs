//! Code generation errors

use thiserror::Error;

/// Errors that can occur while rendering token modules
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    /// The input still contains placeholder values
    ///
    /// Rendering placeholder data would publish non-real design values;
    /// this error is fatal to the render and is never swallowed.
    #[error("Category '{category}' still contains placeholder tokens (first at '{path}'); refusing to render")]
    PlaceholderToken {
        /// The category that failed the scan
        category: String,
        /// Path of the first placeholder leaf found
        path: String,
    },

    /// A dimension value is not an integer pixel string
    #[error("Unsupported dimension value '{value}': expected an integer pixel string like \"4px\"")]
    UnsupportedUnit {
        /// The offending value
        value: String,
    },

    /// A color value is not a parseable hex string
    #[error("Invalid color value '{value}': expected '#rrggbb' or '#rrggbbaa'")]
    InvalidColor {
        /// The offending value
        value: String,
    },

    /// Serializing a value map failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CodegenError {
    fn from(e: serde_json::Error) -> Self {
        CodegenError::Serialization(e.to_string())
    }
}

/// Result type for code generation
pub type Result<T> = std::result::Result<T, CodegenError>;
