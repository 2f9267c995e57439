//! Error types for the certificate populator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while populating a certificate database.
#[derive(Error, Debug)]
pub enum PopulatorError {
    /// The term vocabulary file does not exist.
    #[error("terms file not found: {0}")]
    TermsFileNotFound(PathBuf),

    /// The term vocabulary file exists but could not be read.
    #[error("failed to read terms file {path}: {source}")]
    TermsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A text line asked for more distinct terms than the vocabulary holds.
    #[error("vocabulary too small: {requested} terms requested, {available} available")]
    InsufficientVocabulary { requested: usize, available: usize },

    /// Connection, statement-execution, or commit failure from the store.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
