//! ScrapeFlow CLI — crawl-batch intake and metadata normalization.
//!
//! Validates and deduplicates target URLs, fans a shared crawl
//! configuration out across them, and reshapes scraped metadata into
//! categorized, display-ready structures.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
