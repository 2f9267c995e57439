//! Field generators for synthetic certificate records.
//!
//! All generation draws from one seeded RNG so a run is reproducible for a
//! given seed. Dates are relative to an injectable reference date, which
//! defaults to today.

use crate::error::PopulatorError;
use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Size of the date-of-birth window, in days past January 1 a century ago.
pub const DOB_WINDOW_DAYS: i64 = 30_000;

/// Maximum number of distinct terms joined into one text line.
pub const MAX_TERMS_PER_LINE: usize = 2;

/// One row for the `BigIdent` table.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
    pub certificate_key: i64,
    pub date_of_birth: NaiveDate,
    pub date_of_death: NaiveDate,
    pub sex: String,
}

/// One row for the `BigMedCod` table.
#[derive(Debug, Clone)]
pub struct TextLineRecord {
    pub certificate_key: i64,
    pub line_nb: i64,
    pub text_line: String,
}

/// A complete generated certificate: the identity row plus its text lines.
#[derive(Debug, Clone)]
pub struct CertificateRecord {
    pub identity: IdentityRecord,
    pub lines: Vec<TextLineRecord>,
}

/// Generates random certificate field values from a seeded RNG.
#[derive(Debug)]
pub struct FieldGenerator {
    rng: StdRng,
    reference_date: NaiveDate,
}

impl FieldGenerator {
    /// Create a generator seeded with `seed`, relative to today's date.
    pub fn new(seed: u64) -> Self {
        Self::with_reference_date(seed, Local::now().date_naive())
    }

    /// Create a generator with an explicit reference date.
    pub fn with_reference_date(seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            reference_date,
        }
    }

    /// Random date of birth: January 1 a century before the reference date,
    /// plus a uniform offset of up to [`DOB_WINDOW_DAYS`] days. Keeps every
    /// subject an adult born within the trailing hundred years without any
    /// explicit age math at use time.
    pub fn date_of_birth(&mut self) -> NaiveDate {
        let century_start = NaiveDate::from_ymd_opt(self.reference_date.year() - 100, 1, 1)
            .expect("January 1 is valid in every year");
        century_start + Duration::days(self.rng.gen_range(0..DOB_WINDOW_DAYS))
    }

    /// Random date of death within the last year: one to 365 days before the
    /// reference date, never the reference date itself.
    pub fn date_of_death(&mut self) -> NaiveDate {
        self.reference_date - Duration::days(self.rng.gen_range(1..=365))
    }

    /// Random sex code, "1" or "2" with equal probability.
    pub fn sex(&mut self) -> String {
        self.rng.gen_range(1..=2u8).to_string()
    }

    /// Random text line: a uniform count in `1..=max_terms` of DISTINCT terms
    /// sampled without replacement, joined with ", ".
    pub fn text_line(
        &mut self,
        terms: &[String],
        max_terms: usize,
    ) -> Result<String, PopulatorError> {
        if max_terms > terms.len() {
            return Err(PopulatorError::InsufficientVocabulary {
                requested: max_terms,
                available: terms.len(),
            });
        }

        let count = self.rng.gen_range(1..=max_terms);
        let picked: Vec<&str> = terms
            .choose_multiple(&mut self.rng, count)
            .map(String::as_str)
            .collect();
        Ok(picked.join(", "))
    }

    /// Assemble one complete certificate for the given key: identity fields,
    /// the mandatory line 0, and lines 1 and 5 each present on roughly half
    /// of the certificates.
    ///
    /// Date of death is generated independently of date of birth and may
    /// precede it; the records only have to look plausible, not make sense.
    pub fn next_certificate(
        &mut self,
        key: i64,
        terms: &[String],
    ) -> Result<CertificateRecord, PopulatorError> {
        let identity = IdentityRecord {
            certificate_key: key,
            date_of_birth: self.date_of_birth(),
            date_of_death: self.date_of_death(),
            sex: self.sex(),
        };

        let mut lines = vec![TextLineRecord {
            certificate_key: key,
            line_nb: 0,
            text_line: self.text_line(terms, MAX_TERMS_PER_LINE)?,
        }];

        for line_nb in [1, 5] {
            if self.rng.gen_bool(0.5) {
                lines.push(TextLineRecord {
                    certificate_key: key,
                    line_nb,
                    text_line: self.text_line(terms, MAX_TERMS_PER_LINE)?,
                });
            }
        }

        Ok(CertificateRecord { identity, lines })
    }
}
