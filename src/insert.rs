//! Parameterized INSERT and DELETE statements for the certificate tables.

use crate::error::PopulatorError;
use crate::generator::CertificateRecord;
use rusqlite::{params, Transaction};

pub const INSERT_IDENTITY_SQL: &str =
    "INSERT INTO BigIdent (CertificateKey, DateBirth, DateDeath, Sex) VALUES (?1, ?2, ?3, ?4)";

pub const INSERT_TEXT_LINE_SQL: &str =
    "INSERT INTO BigMedCod (CertificateKey, LineNb, TextLine) VALUES (?1, ?2, ?3)";

/// Insert one certificate: the identity row and all of its text lines.
///
/// Dates are bound as ISO-8601 strings. Returns the number of rows written.
/// The caller owns the transaction; nothing is committed here.
pub fn insert_certificate(
    tx: &Transaction<'_>,
    record: &CertificateRecord,
) -> Result<u64, PopulatorError> {
    let mut identity = tx.prepare_cached(INSERT_IDENTITY_SQL)?;
    identity.execute(params![
        record.identity.certificate_key,
        record.identity.date_of_birth.to_string(),
        record.identity.date_of_death.to_string(),
        record.identity.sex,
    ])?;

    let mut text_line = tx.prepare_cached(INSERT_TEXT_LINE_SQL)?;
    for line in &record.lines {
        text_line.execute(params![line.certificate_key, line.line_nb, line.text_line])?;
    }

    Ok(1 + record.lines.len() as u64)
}

/// Delete every row from both certificate tables.
pub fn delete_all(tx: &Transaction<'_>) -> Result<(), PopulatorError> {
    tx.execute("DELETE FROM BigIdent", [])?;
    tx.execute("DELETE FROM BigMedCod", [])?;
    Ok(())
}
