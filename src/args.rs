//! CLI argument definitions for the certificate populator.

use crate::populator::DEFAULT_START_KEY;
use clap::Parser;
use std::path::PathBuf;

/// Populate a certificate database with synthetic records for load testing.
///
/// The database must already contain the `BigIdent` and `BigMedCod` tables;
/// every run deletes all rows from both before generating. Generated
/// certificates are often nonsensical ("brain cancer due to a cough") since
/// terms are sampled at random from the vocabulary file.
#[derive(Parser, Clone, Debug)]
#[command(name = "cert-populate", version)]
pub struct Cli {
    /// Path to the certificate database file
    pub database: PathBuf,

    /// Number of certificate records to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub record_count: u64,

    /// Term vocabulary file, one candidate phrase per line
    #[arg(long, short = 't', default_value = "conditions.txt")]
    pub terms_file: PathBuf,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// First CertificateKey to assign
    #[arg(long, default_value_t = DEFAULT_START_KEY)]
    pub start_key: i64,
}
