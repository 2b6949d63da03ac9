//! Date and datetime coercion tolerant of legacy MySQL text.
//!
//! # Responsibility
//! - Map the `0000-00-00` sentinel and unparsable text onto `None`.
//! - Localize naive stored datetimes into the configured zone when the
//!   deployment runs timezone-aware.
//!
//! # Invariants
//! - A sentinel or unparsable value is always `None`, never an error and
//!   never a fabricated default such as the epoch.
//! - Already-typed values pass through unchanged; re-coercing serialized
//!   output is idempotent.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rusqlite::types::ValueRef;

/// Legacy MySQL "no date" marker. Matching is a fixed literal prefix;
/// variant separators (e.g. `0000/00/00`) are not treated as sentinels
/// and instead fall through the parse chain.
const ZERO_DATE_PREFIX: &str = "0000-00-00";

/// Datetime layouts attempted in order before the date-only fallback.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Date layouts for date-only columns and the midnight fallback.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Localization policy for temporal coercion, derived from process config
/// (optionally overridden per storage connection).
#[derive(Debug, Clone, Copy)]
pub struct TemporalPolicy {
    /// When true, naive parses are localized into `zone`; when false they
    /// are interpreted at UTC offset zero.
    pub use_tz: bool,
    pub zone: Tz,
}

/// Coerces a raw column value to an optional timezone-aware timestamp.
///
/// Text is parsed through the sentinel check and format chain; a native
/// integer is read as epoch seconds (already-typed storage), then shifted
/// into the policy zone. Everything unparsable is `None`.
pub fn coerce_timestamp(raw: ValueRef<'_>, policy: &TemporalPolicy) -> Option<DateTime<FixedOffset>> {
    match raw {
        ValueRef::Null => None,
        ValueRef::Integer(epoch_seconds) => DateTime::from_timestamp(epoch_seconds, 0)
            .map(|utc| shift_to_policy_zone(utc, policy)),
        ValueRef::Real(epoch_seconds) => DateTime::from_timestamp(epoch_seconds.trunc() as i64, 0)
            .map(|utc| shift_to_policy_zone(utc, policy)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| coerce_timestamp_text(text, policy)),
        ValueRef::Blob(_) => None,
    }
}

/// Coerces candidate datetime text, applying sentinel and localization
/// rules.
pub fn coerce_timestamp_text(text: &str, policy: &TemporalPolicy) -> Option<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(ZERO_DATE_PREFIX) {
        return None;
    }

    // Offset-carrying text is already aware; honor its offset, then view
    // it from the policy zone.
    if let Ok(aware) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(shift_to_policy_zone(aware.with_timezone(&Utc), policy));
    }

    coerce_naive_datetime_text(trimmed).map(|naive| localize(naive, policy))
}

/// Parses naive datetime text through the tolerant format chain.
///
/// Date-only text yields midnight. Returns `None` when no layout matches.
pub fn coerce_naive_datetime_text(text: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Coerces a raw column value to an optional calendar date.
///
/// Sentinel dates and junk are `None`; datetime text is accepted with the
/// time-of-day discarded.
pub fn coerce_date(raw: ValueRef<'_>) -> Option<NaiveDate> {
    match raw {
        ValueRef::Null => None,
        ValueRef::Integer(epoch_seconds) => {
            DateTime::from_timestamp(epoch_seconds, 0).map(|utc| utc.date_naive())
        }
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(coerce_date_text),
        _ => None,
    }
}

/// Coerces candidate date text, applying the sentinel rule.
pub fn coerce_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(ZERO_DATE_PREFIX) {
        return None;
    }

    coerce_naive_datetime_text(trimmed).map(|naive| naive.date())
}

fn localize(naive: NaiveDateTime, policy: &TemporalPolicy) -> DateTime<FixedOffset> {
    if policy.use_tz {
        // Gap times during a DST transition resolve to the earliest valid
        // instant; the zones this system runs in do not observe DST, so
        // the branch is effectively unused but must not panic.
        match policy.zone.from_local_datetime(&naive).earliest() {
            Some(aware) => aware.fixed_offset(),
            None => Utc.from_utc_datetime(&naive).fixed_offset(),
        }
    } else {
        Utc.from_utc_datetime(&naive).fixed_offset()
    }
}

fn shift_to_policy_zone(utc: DateTime<Utc>, policy: &TemporalPolicy) -> DateTime<FixedOffset> {
    if policy.use_tz {
        utc.with_timezone(&policy.zone).fixed_offset()
    } else {
        utc.fixed_offset()
    }
}
