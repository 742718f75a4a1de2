//! Code generation for the Meridian token pipeline
//!
//! Renders transformed token maps into the two consumer dialects (a
//! TypeScript module per category for the web client, a Swift module per
//! category for the iOS client) plus the canonical JSON snapshot, and
//! writes the rendered files with per-file failure isolation.
//!
//! Every renderer refuses to run while its input still contains
//! placeholder values; unfinished token data never reaches an output file.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod emit;
pub mod error;
pub mod identifier;
pub mod swift;
pub mod typescript;

pub use emit::{render_all, render_snapshot, write_all, RenderedFile, WriteReport};
pub use error::{CodegenError, Result};
pub use swift::render_native_module;
pub use typescript::render_module;
