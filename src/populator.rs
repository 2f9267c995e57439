//! Certificate populator: reset and generate-and-insert over one connection.

use crate::error::PopulatorError;
use crate::generator::FieldGenerator;
use crate::insert::{delete_all, insert_certificate};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// First CertificateKey assigned by a run.
pub const DEFAULT_START_KEY: i64 = 100_000;

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Rows written to the identity table.
    pub identity_rows: u64,
    /// Rows written to the text-line table.
    pub text_line_rows: u64,
    /// Total time taken, generation and inserts included.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Total rows written across both tables.
    pub fn total_rows(&self) -> u64 {
        self.identity_rows + self.text_line_rows
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.total_rows() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Populator that wipes and refills the certificate tables.
///
/// Owns the single connection for the run; it is released when the populator
/// is dropped, on error paths included. Both `BigIdent` and `BigMedCod` must
/// already exist — the populator never creates or alters schema.
#[derive(Debug)]
pub struct CertPopulator {
    conn: Connection,
    generator: FieldGenerator,
    terms: Vec<String>,
    start_key: i64,
}

impl CertPopulator {
    /// Open the database at `path`.
    ///
    /// The file must already exist; the create flag is deliberately left off
    /// so a bad path fails here instead of producing an empty database.
    pub fn open(path: &Path, terms: Vec<String>, seed: u64) -> Result<Self, PopulatorError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::new(conn, terms, seed))
    }

    /// Create a populator over an existing connection.
    pub fn new(conn: Connection, terms: Vec<String>, seed: u64) -> Self {
        Self {
            conn,
            generator: FieldGenerator::new(seed),
            terms,
            start_key: DEFAULT_START_KEY,
        }
    }

    /// Set the first CertificateKey to assign.
    pub fn with_start_key(mut self, start_key: i64) -> Self {
        self.start_key = start_key;
        self
    }

    /// Replace the field generator, e.g. one pinned to a fixed reference date.
    pub fn with_generator(mut self, generator: FieldGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Delete all rows from both certificate tables and commit.
    ///
    /// Idempotent: running it against empty tables is a no-op.
    pub fn reset(&mut self) -> Result<(), PopulatorError> {
        info!("Clearing existing rows from BigIdent and BigMedCod");
        let tx = self.conn.transaction()?;
        delete_all(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Generate and insert `count` certificates with contiguous keys starting
    /// at the configured start key.
    ///
    /// The whole batch runs in one transaction committed after the loop, so a
    /// failure partway through leaves nothing behind.
    pub fn populate(&mut self, count: u64) -> Result<PopulateMetrics, PopulatorError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Generating {} certificates starting at key {}",
            count, self.start_key
        );

        let tx = self.conn.transaction()?;
        for key in self.start_key..self.start_key + count as i64 {
            let record = self.generator.next_certificate(key, &self.terms)?;
            let inserted = insert_certificate(&tx, &record)?;
            metrics.identity_rows += 1;
            metrics.text_line_rows += inserted - 1;
        }
        tx.commit()?;

        metrics.total_duration = start_time.elapsed();
        info!(
            "Population complete: {} identity rows, {} text lines in {:?} ({:.2} rows/sec)",
            metrics.identity_rows,
            metrics.text_line_rows,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Row count of the identity table.
    pub fn identity_row_count(&self) -> Result<u64, PopulatorError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM BigIdent", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Row count of the text-line table.
    pub fn text_line_row_count(&self) -> Result<u64, PopulatorError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM BigMedCod", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SCHEMA: &str = "
        CREATE TABLE BigIdent (
            CertificateKey INTEGER,
            DateBirth DATE,
            DateDeath DATE,
            Sex TEXT
        );
        CREATE TABLE BigMedCod (
            CertificateKey INTEGER,
            LineNb INTEGER,
            TextLine TEXT
        );
    ";

    fn test_terms() -> Vec<String> {
        ["influenza", "sepsis", "stroke", "asthma", "fracture"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn test_populator(seed: u64) -> CertPopulator {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(TEST_SCHEMA).unwrap();
        CertPopulator::new(conn, test_terms(), seed)
    }

    #[test]
    fn test_populate_contiguous_keys() {
        let mut populator = test_populator(1);
        populator.reset().unwrap();
        let metrics = populator.populate(5).unwrap();

        assert_eq!(metrics.identity_rows, 5);
        assert_eq!(populator.identity_row_count().unwrap(), 5);

        let keys: Vec<i64> = populator
            .connection()
            .prepare("SELECT CertificateKey FROM BigIdent ORDER BY CertificateKey")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(keys, vec![100_000, 100_001, 100_002, 100_003, 100_004]);
    }

    #[test]
    fn test_populate_text_line_shape() {
        let mut populator = test_populator(2);
        populator.populate(50).unwrap();

        let text_lines = populator.text_line_row_count().unwrap();
        assert!((50..=150).contains(&text_lines));

        // Exactly one line 0 per certificate, everything else on lines 1 or 5.
        let line0: i64 = populator
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM BigMedCod WHERE LineNb = 0",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(line0, 50);

        let stray: i64 = populator
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM BigMedCod WHERE LineNb NOT IN (0, 1, 5)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stray, 0);
    }

    #[test]
    fn test_populate_identity_columns() {
        let mut populator = test_populator(3);
        populator.populate(20).unwrap();

        let bad_sex: i64 = populator
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM BigIdent WHERE Sex NOT IN ('1', '2')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(bad_sex, 0);

        // ISO date strings compare lexicographically, so range checks work in SQL.
        let future_death: i64 = populator
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM BigIdent WHERE DateDeath >= date('now')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(future_death, 0);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut populator = test_populator(4);
        populator.populate(10).unwrap();

        populator.reset().unwrap();
        populator.reset().unwrap();
        assert_eq!(populator.identity_row_count().unwrap(), 0);
        assert_eq!(populator.text_line_row_count().unwrap(), 0);
    }

    #[test]
    fn test_reset_then_repopulate() {
        let mut populator = test_populator(5);
        populator.populate(10).unwrap();
        populator.reset().unwrap();
        populator.populate(3).unwrap();

        assert_eq!(populator.identity_row_count().unwrap(), 3);
        assert!((3..=9).contains(&populator.text_line_row_count().unwrap()));
    }

    #[test]
    fn test_custom_start_key() {
        let mut populator = test_populator(6).with_start_key(500);
        populator.populate(2).unwrap();

        let min_key: i64 = populator
            .connection()
            .query_row("SELECT MIN(CertificateKey) FROM BigIdent", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(min_key, 500);
    }

    #[test]
    fn test_populate_insufficient_vocabulary_writes_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(TEST_SCHEMA).unwrap();
        let mut populator = CertPopulator::new(conn, vec!["only".to_string()], 7);

        let err = populator.populate(5).unwrap_err();
        assert!(matches!(
            err,
            PopulatorError::InsufficientVocabulary { .. }
        ));
        assert_eq!(populator.identity_row_count().unwrap(), 0);
        assert_eq!(populator.text_line_row_count().unwrap(), 0);
    }
}
