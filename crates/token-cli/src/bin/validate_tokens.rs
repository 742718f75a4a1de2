//! validate-tokens: check that the committed tokens are ready to consume
//!
//! Loads the committed snapshot, prints a per-category status table, and
//! runs the runtime guard. Exits 0 only when every category is extracted.

use clap::Parser;
use std::path::PathBuf;
use token_store::TokenCategory;

#[derive(Parser, Debug)]
#[command(
    name = "validate-tokens",
    about = "Check that the committed design tokens are extracted and ready"
)]
struct Args {
    /// Path to the committed token snapshot
    #[arg(long, default_value = token_cli::DEFAULT_TOKENS_PATH)]
    tokens: PathBuf,
}

#[tokio::main]
async fn main() {
    token_cli::init_tracing();
    let args = Args::parse();

    let store = token_cli::load_store_or_placeholder(&args.tokens).await;

    println!("{:<12} {:<12} {:>7}  {}", "Category", "Status", "Tokens", "Last sync");
    for category in TokenCategory::all() {
        let meta = store.category_metadata(category);
        let status = if meta.placeholder_mode {
            "placeholder"
        } else {
            "extracted"
        };
        let last_sync = meta
            .last_sync
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<12} {:<12} {:>7}  {last_sync}",
            category.to_string(),
            status,
            meta.token_count
        );
    }

    match store.validate_all_tokens() {
        Ok(()) => println!("\nAll token categories are extracted and ready."),
        Err(e) => {
            eprintln!("\n{e}");
            std::process::exit(1);
        }
    }
}
