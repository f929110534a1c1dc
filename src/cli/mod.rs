//! CLI commands implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::collector::collect_two_hop;
use crate::export::write_workbook;
use crate::openalex::OpenAlexClient;

/// Seed article used when no seed ids are given on the command line.
pub const DEFAULT_SEED_ID: &str = "w295038424";

#[derive(Parser)]
#[command(name = "citeharvest")]
#[command(about = "Citation graph acquisition and research dataset builder")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest the two-hop citation graph and write the workbook
    Harvest {
        /// Seed work ids (defaults to the built-in seed article)
        seed_ids: Vec<String>,

        /// Output workbook path
        #[arg(short, long, default_value = "research_data.xlsx")]
        output: PathBuf,

        /// Contact email for the OpenAlex polite pool
        #[arg(long, env = "CITEHARVEST_MAILTO")]
        mailto: Option<String>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            seed_ids,
            output,
            mailto,
        } => cmd_harvest(seed_ids, &output, mailto).await,
    }
}

async fn cmd_harvest(
    seed_ids: Vec<String>,
    output: &Path,
    mailto: Option<String>,
) -> anyhow::Result<()> {
    let seed_ids = if seed_ids.is_empty() {
        vec![DEFAULT_SEED_ID.to_string()]
    } else {
        seed_ids
    };

    println!(
        "{} {}",
        style("Harvesting citation graph for").bold(),
        seed_ids.join(", ")
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("Expanding citation graph (two hops)...");

    let client = OpenAlexClient::new().with_mailto(mailto);
    let result = collect_two_hop(client, &seed_ids).await;
    pb.finish_and_clear();
    let dataset = result?;

    // All-or-nothing: the workbook is only written once the full traversal
    // has succeeded.
    write_workbook(&dataset, output)?;

    println!(
        "  {} {} papers, {} authors, {} authorship links, {} references, {} citation edges",
        style("✓").green(),
        dataset.papers.len(),
        dataset.authors.len(),
        dataset.authorships.len(),
        dataset.references.len(),
        dataset.citations.len(),
    );
    println!("  {} wrote {}", style("✓").green(), output.display());

    Ok(())
}
