//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service/business orchestration.
//! - Apply each legacy column's coercion strategy exactly once on read.
//!
//! # Invariants
//! - Write paths call the record's `validate()` before SQL mutations and
//!   persist canonical typed values; legacy-text tolerance is a read-side
//!   concern only.
//! - Coercion failures never surface as repository errors; they resolve
//!   to absent values. Range violations are the only rejected write.

use crate::coerce::numeric::{coerce_decimal, coerce_integer, ZeroPolicy};
use crate::coerce::temporal::{coerce_date, coerce_timestamp, TemporalPolicy};
use crate::db::DbError;
use crate::model::ValidationError;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rusqlite::Row;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod building_repo;
pub mod contact_repo;
pub mod od_form_repo;
pub mod unit_repo;
pub mod user_repo;

/// Auto-increment primary key inherited from the legacy schema.
pub type RecordId = i64;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: RecordId },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

// Read-side hooks: one call per legacy column, integer-tolerant /
// decimal-tolerant / datetime-tolerant strategies respectively.

pub(crate) fn read_integer(row: &Row<'_>, column: &str, zero: ZeroPolicy) -> RepoResult<Option<i64>> {
    Ok(coerce_integer(row.get_ref(column)?, zero))
}

pub(crate) fn read_decimal(row: &Row<'_>, column: &str, scale: u32) -> RepoResult<Option<Decimal>> {
    Ok(coerce_decimal(row.get_ref(column)?, scale))
}

pub(crate) fn read_timestamp(
    row: &Row<'_>,
    column: &str,
    policy: &TemporalPolicy,
) -> RepoResult<Option<DateTime<FixedOffset>>> {
    Ok(coerce_timestamp(row.get_ref(column)?, policy))
}

pub(crate) fn read_date(row: &Row<'_>, column: &str) -> RepoResult<Option<NaiveDate>> {
    Ok(coerce_date(row.get_ref(column)?))
}

// Write-side serializers: canonical storage text for typed values.

pub(crate) fn decimal_to_db(value: Option<Decimal>) -> Option<String> {
    value.map(|dec| dec.to_string())
}

pub(crate) fn date_to_db(value: Option<NaiveDate>) -> Option<String> {
    value.map(|date| date.format("%Y-%m-%d").to_string())
}

pub(crate) fn timestamp_to_db(value: Option<DateTime<FixedOffset>>) -> Option<String> {
    value.map(|ts| ts.to_rfc3339())
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(entity: &'static str, column: &str, value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in {entity}"
        ))),
    }
}
