//! Token store for the Meridian design system
//!
//! This crate defines the design-token data model: token values with a
//! type-level placeholder state, the raw extraction types, nested category
//! maps, per-category extraction metadata, and the guarded [`TokenStore`]
//! that consumers read tokens from.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod metadata;
pub mod schema;
pub mod store;
pub mod value;

pub use metadata::TokenMetadata;
pub use schema::{
    CategoryMaps, ExtractionMetadata, RawToken, RawTokenCollection, SemanticToken, TokenCategory,
};
pub use store::{ReadinessError, StoreError, TokenStore};
pub use value::{TokenValue, PLACEHOLDER_SENTINEL};
