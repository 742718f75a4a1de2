//! Shared plumbing for the Meridian token binaries
//!
//! The binaries themselves are thin: argument parsing, orchestration of
//! the library crates, console output, and exit codes live there. This
//! crate holds only the pieces all three share.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::Path;
use token_store::TokenStore;
use tracing_subscriber::EnvFilter;

/// Default output directory for generated token files
pub const DEFAULT_OUT_DIR: &str = "design";

/// Default path of the committed canonical snapshot
pub const DEFAULT_TOKENS_PATH: &str = "design/tokens.json";

/// Default path of the ground-truth snapshot exported from Figma
pub const DEFAULT_TRUTH_PATH: &str = "tokens-from-figma.json";

/// Install the tracing subscriber for a CLI invocation
///
/// Honors `RUST_LOG` when set; defaults to `info` otherwise.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Load the committed token store, falling back to the placeholder state
///
/// A missing or unreadable snapshot is not an error for the validation
/// binaries: it is reported as every category being unextracted, which the
/// readiness checks then fail with an actionable message.
pub async fn load_store_or_placeholder(path: &Path) -> TokenStore {
    match TokenStore::load(path).await {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(
                "Could not load committed tokens from {}: {e}; treating every category as placeholder",
                path.display()
            );
            TokenStore::placeholder()
        }
    }
}
