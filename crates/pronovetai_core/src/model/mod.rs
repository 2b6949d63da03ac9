//! Domain models for the brokerage back-office.
//!
//! # Responsibility
//! - Define canonical record shapes for buildings, units, inquiry forms,
//!   directory records and users.
//! - Enforce cross-field range invariants before persistence.
//!
//! # Invariants
//! - A range pair (minimum/maximum) is only checked when both bounds are
//!   present; absent bounds never raise a violation.
//! - Validation failures are the only rejected-write condition; tolerant
//!   coercion upstream never produces an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod building;
pub mod od_form;
pub mod records;
pub mod unit;
pub mod user;

/// Structured validation failure surfaced to the API boundary as a
/// rejected write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A declared range pair has minimum > maximum. Identifies both field
    /// names so the caller can resubmit corrected data.
    RangeOrder {
        minimum_field: &'static str,
        maximum_field: &'static str,
    },
    MissingField { field: &'static str },
    InvalidChoice { field: &'static str, value: String },
    InvalidEmail { value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RangeOrder {
                minimum_field,
                maximum_field,
            } => write!(f, "{minimum_field} cannot be greater than {maximum_field}"),
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::InvalidChoice { field, value } => {
                write!(f, "invalid choice `{value}` for {field}")
            }
            Self::InvalidEmail { value } => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Checks one declared range pair.
///
/// The invariant only applies when both bounds are present.
pub(crate) fn check_range_pair<T: PartialOrd>(
    minimum: Option<&T>,
    maximum: Option<&T>,
    minimum_field: &'static str,
    maximum_field: &'static str,
) -> Result<(), ValidationError> {
    if let (Some(low), Some(high)) = (minimum, maximum) {
        if low > high {
            return Err(ValidationError::RangeOrder {
                minimum_field,
                maximum_field,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_range_pair, ValidationError};

    #[test]
    fn ordered_pair_passes() {
        assert!(check_range_pair(Some(&50), Some(&100), "size_minimum", "size_maximum").is_ok());
    }

    #[test]
    fn inverted_pair_identifies_fields() {
        let err = check_range_pair(Some(&100), Some(&50), "size_minimum", "size_maximum")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::RangeOrder {
                minimum_field: "size_minimum",
                maximum_field: "size_maximum",
            }
        );
    }

    #[test]
    fn absent_bound_is_exempt() {
        assert!(check_range_pair::<i64>(None, Some(&50), "a", "b").is_ok());
        assert!(check_range_pair(Some(&100), None, "a", "b").is_ok());
        assert!(check_range_pair::<i64>(None, None, "a", "b").is_ok());
    }
}
