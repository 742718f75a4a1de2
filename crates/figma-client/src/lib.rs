//! Figma client for the Meridian token pipeline
//!
//! This crate owns the network edge of the pipeline: credentials handling,
//! the REST client for the Figma variables API, flattening the API response
//! into a [`token_store::RawTokenCollection`], and the pure transformation
//! that reshapes the flat token list into nested category maps.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod extract;
pub mod transform;

pub use client::{FigmaClient, FigmaClientError, FigmaCredentials};
pub use extract::simulated_collection;
pub use transform::{transform_tokens, TransformError};
