//! validate-figma-tokens: diff the committed tokens against the Figma
//! ground truth
//!
//! Loads the ground-truth snapshot (fatal when missing or malformed) and
//! the committed store, runs every consistency check, prints the grouped
//! report, optionally writes it as JSON for CI, and exits non-zero when
//! any check failed.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use validation::{load_snapshot, run_checks};

#[derive(Parser, Debug)]
#[command(
    name = "validate-figma-tokens",
    about = "Validate the committed design tokens against the Figma snapshot"
)]
struct Args {
    /// Path to the ground-truth snapshot exported from Figma
    #[arg(long, default_value = token_cli::DEFAULT_TRUTH_PATH)]
    snapshot: PathBuf,

    /// Path to the committed token snapshot
    #[arg(long, default_value = token_cli::DEFAULT_TOKENS_PATH)]
    tokens: PathBuf,

    /// Also write the structured report to this path as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    token_cli::init_tracing();
    let args = Args::parse();

    // Validation cannot proceed without ground truth.
    let truth = match load_snapshot(&args.snapshot).await {
        Ok(truth) => truth,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let store = token_cli::load_store_or_placeholder(&args.tokens).await;

    let report = run_checks(&truth, &store);
    print!("{}", report.render());

    if let Some(path) = &args.json {
        let json = report.to_json().context("serializing validation report")?;
        tokio::fs::write(path, json + "\n")
            .await
            .with_context(|| format!("writing JSON report to {}", path.display()))?;
        println!("JSON report written to {}", path.display());
    }

    std::process::exit(report.exit_code());
}
