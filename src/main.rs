//! Command-line interface for cert-populate
//!
//! # Usage
//!
//! ```bash
//! # Wipe and refill certs.db with one million synthetic certificates
//! cert-populate certs.db 1000000
//!
//! # Reproducible run with a custom vocabulary
//! cert-populate certs.db 50000 --terms-file dictionary.txt --seed 7
//! ```
//!
//! The database file and both target tables must already exist; the tool only
//! deletes and inserts rows. Exit status is 0 on success and 1 on any error,
//! with the failure logged before termination.

use anyhow::Context;
use cert_populate::{load_terms, CertPopulator, Cli};
use clap::Parser;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        error!("An error occurred: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let terms = load_terms(&cli.terms_file)
        .with_context(|| format!("loading term vocabulary from {}", cli.terms_file.display()))?;

    let mut populator = CertPopulator::open(&cli.database, terms, cli.seed)
        .with_context(|| format!("opening certificate database {}", cli.database.display()))?
        .with_start_key(cli.start_key);

    populator
        .reset()
        .context("clearing existing certificate rows")?;
    let metrics = populator
        .populate(cli.record_count)
        .context("generating certificate records")?;

    info!(
        "Database updated successfully: {} rows total ({:.2} rows/sec)",
        metrics.total_rows(),
        metrics.rows_per_second()
    );
    Ok(())
}
