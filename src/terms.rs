//! Term vocabulary loading.

use crate::error::PopulatorError;
use std::fs;
use std::path::Path;

/// Load the term vocabulary from a line-delimited UTF-8 file.
///
/// One candidate phrase per line, in file order. Surrounding whitespace is
/// trimmed so that line terminators never leak into generated text lines;
/// blank lines are skipped. The whole list is read once per run and held in
/// memory for the duration of generation.
pub fn load_terms(path: &Path) -> Result<Vec<String>, PopulatorError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            PopulatorError::TermsFileNotFound(path.to_path_buf())
        } else {
            PopulatorError::TermsRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
