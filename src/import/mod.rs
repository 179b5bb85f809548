//! Bulk import of mileage expenses from pasted text.
//!
//! One record per line, `description;YYYY-MM-DD;distanceKm`. Malformed lines
//! are skipped and counted; they never stop the lines after them.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::NewExpense;
use crate::errors::{ImportError, ValidationError};

const FIELD_SEPARATOR: char = ';';
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of parsing a block: the records that parsed plus how many lines
/// were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkImport {
    pub records: Vec<NewExpense>,
    pub errors: usize,
}

impl BulkImport {
    pub fn success_count(&self) -> usize {
        self.records.len()
    }

    /// An import that produced nothing is a failure, whatever the input held.
    pub fn is_failure(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_result(self) -> Result<Self, ImportError> {
        if self.is_failure() {
            return Err(ImportError::NothingImported {
                errors: self.errors,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
enum LineError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("missing date")]
    MissingDate,
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("invalid distance `{0}`")]
    InvalidDistance(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parses every non-blank line of `text` into a mileage expense.
pub fn parse_mileage_block(text: &str) -> BulkImport {
    let mut import = BulkImport::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(expense) => import.records.push(expense),
            Err(reason) => {
                tracing::debug!(line = index + 1, %reason, "skipping malformed import line");
                import.errors += 1;
            }
        }
    }
    tracing::info!(
        imported = import.success_count(),
        errors = import.errors,
        "mileage import parsed"
    );
    import
}

fn parse_line(line: &str) -> Result<NewExpense, LineError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [description, date, distance] = fields.as_slice() else {
        return Err(LineError::FieldCount(fields.len()));
    };
    if date.is_empty() {
        return Err(LineError::MissingDate);
    }
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| LineError::InvalidDate(date.to_string()))?;
    let distance_km = parse_distance(distance)?;
    Ok(NewExpense::mileage(*description, distance_km, date)?)
}

fn parse_distance(raw: &str) -> Result<Decimal, LineError> {
    let normalized = raw.replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| LineError::InvalidDistance(raw.to_string()))
}
