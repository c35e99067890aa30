mod renderer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::model::PageContent;
use folio_store::{Firestore, StoreConfig};

/// Render the portfolio page in the terminal.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Page content as JSON; built-in sample content when omitted.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Store connection parameters as TOML; FOLIO_STORE_* environment
    /// variables are used when omitted.
    #[arg(long)]
    store_config: Option<PathBuf>,

    /// Accept contact submissions without persisting them (dry run).
    #[arg(long)]
    no_store: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let content = match &cli.content {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("reading content file {}", path.display()))?;
            PageContent::from_json(&data).context("parsing content file")?
        }
        None => PageContent::sample(),
    };

    let store = if cli.no_store {
        None
    } else {
        let config = match &cli.store_config {
            Some(path) => StoreConfig::from_toml_file(path)
                .with_context(|| format!("reading store config {}", path.display()))?,
            None => StoreConfig::from_env().context(
                "store not configured; set FOLIO_STORE_PROJECT_ID and FOLIO_STORE_API_KEY, \
                 pass --store-config, or run with --no-store",
            )?,
        };
        Some(Arc::new(Firestore::new(config)?))
    };

    renderer::run(&content, store)
}
