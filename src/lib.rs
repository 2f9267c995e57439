//! Synthetic certificate database populator for load testing.
//!
//! This crate fills a pre-existing certificate database with arbitrarily many
//! generated records: one identity row per certificate plus one to three
//! free-text cause lines sampled from a term vocabulary. Because terms are
//! picked at random, the resulting certificates are often nonsensical; the
//! point is volume for load and performance testing, not meaningful data.
//!
//! # Example
//!
//! ```ignore
//! use cert_populate::{load_terms, CertPopulator};
//!
//! let terms = load_terms("conditions.txt".as_ref())?;
//! let mut populator = CertPopulator::open("certs.db".as_ref(), terms, 42)?;
//! populator.reset()?;
//! let metrics = populator.populate(100_000)?;
//! println!("{} rows/sec", metrics.rows_per_second());
//! ```

pub mod args;
mod error;
mod generator;
mod insert;
mod populator;
mod terms;

pub use args::Cli;
pub use error::PopulatorError;
pub use generator::{
    CertificateRecord, FieldGenerator, IdentityRecord, TextLineRecord, MAX_TERMS_PER_LINE,
};
pub use populator::{CertPopulator, PopulateMetrics, DEFAULT_START_KEY};
pub use terms::load_terms;
