//! extract-tokens: pull design tokens from Figma and generate the
//! consumer modules
//!
//! With credentials (flags or environment), extracts from the real Figma
//! file. Without credentials the run fails, unless `--allow-placeholder`
//! explicitly opts into the built-in simulated dataset; the silent
//! fall-through of earlier tooling is deliberately gone, so a CI job
//! without credentials cannot publish simulated values by accident.

use anyhow::Result;
use clap::Parser;
use figma_client::{simulated_collection, transform_tokens, FigmaClient, FigmaCredentials};
use std::path::PathBuf;
use token_store::TokenStore;

#[derive(Parser, Debug)]
#[command(
    name = "extract-tokens",
    about = "Extract design tokens from Figma and generate the consumer modules"
)]
struct Args {
    /// Figma file id to extract from
    #[arg(long, env = "FIGMA_FILE_ID")]
    file_id: Option<String>,

    /// Figma personal access token
    #[arg(long, env = "FIGMA_TOKEN")]
    token: Option<String>,

    /// Output directory for generated files
    #[arg(long, default_value = token_cli::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Generate from the built-in simulated dataset when credentials are
    /// missing (development only)
    #[arg(long)]
    allow_placeholder: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    token_cli::init_tracing();
    let args = Args::parse();

    let collection = match (&args.file_id, &args.token) {
        (Some(file_id), Some(token)) => {
            let client = FigmaClient::new(FigmaCredentials::new(file_id, token))?;
            client.extract_tokens().await?
        }
        _ if args.allow_placeholder => {
            tracing::warn!(
                "No Figma credentials; generating from the SIMULATED dataset. \
                 Do not commit this output as real design values."
            );
            simulated_collection()
        }
        _ => {
            anyhow::bail!(
                "Figma credentials missing. Pass --file-id and --token, set \
                 FIGMA_FILE_ID and FIGMA_TOKEN, or pass --allow-placeholder to \
                 generate the simulated development dataset."
            );
        }
    };

    let maps = transform_tokens(&collection)?;
    let store = TokenStore::from_extraction(maps, &collection.metadata);
    let files = codegen::render_all(&store)?;
    let report = codegen::write_all(&files, &args.out_dir).await;

    for path in &report.written {
        println!("wrote {}", path.display());
    }
    if !report.all_succeeded() {
        for (path, message) in &report.failed {
            eprintln!("FAILED {}: {message}", path.display());
        }
        std::process::exit(1);
    }

    println!(
        "Extracted {} tokens from {} into {}",
        collection.metadata.token_count,
        collection.metadata.figma_file_id,
        args.out_dir.display()
    );
    Ok(())
}
