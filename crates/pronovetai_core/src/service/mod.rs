//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Normalize inbound payload candidate values (tolerant coercion),
//!   then range-validate, before any write reaches storage.
//!
//! # Invariants
//! - Payload coercion never fails a request; only structural problems
//!   (missing required fields, bad choices) and range violations reject
//!   a write.

pub mod building_service;
pub mod od_form_service;
pub mod unit_service;

use crate::model::ValidationError;

pub(crate) fn required<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField { field }),
    }
}

pub(crate) fn parse_choice<T>(
    value: Option<&str>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match value {
        None => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field,
                value: text.to_string(),
            }),
    }
}

pub(crate) fn required_choice<T>(
    value: Option<&str>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let text = required(value, field)?;
    parse(text).ok_or_else(|| ValidationError::InvalidChoice {
        field,
        value: text.to_string(),
    })
}
