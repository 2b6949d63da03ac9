//! Tolerant value coercion for the legacy relational schema.
//!
//! # Responsibility
//! - Convert raw stored representations (often text) into typed optional
//!   application values on every read.
//! - Normalize inbound payload text into the same typed values before
//!   validation on the write path.
//!
//! # Invariants
//! - Every coercion is a pure function of its input; no hidden state.
//! - Coercion never returns an error. Every failure mode resolves to
//!   `None`; bad legacy data reads as "unknown", never as a crash or a
//!   fabricated default.
//! - Re-coercing a serialized coerced value yields an equal value.
//!
//! Three named strategies cover every legacy column:
//! - integer-tolerant: [`numeric::coerce_integer`]
//! - decimal-tolerant: [`numeric::coerce_decimal`]
//! - datetime-tolerant: [`temporal::coerce_timestamp`] / [`temporal::coerce_date`]

pub mod numeric;
pub mod temporal;
