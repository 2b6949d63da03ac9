//! Unit use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Turn raw API payloads into validated `Unit` records.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence
//!   contracts.
//! - Payload text goes through the same tolerant coercion as storage
//!   reads; junk resolves to absent, never to an error.

use crate::coerce::numeric::{coerce_decimal_text, coerce_integer_text};
use crate::coerce::temporal::coerce_date_text;
use crate::config::CoreConfig;
use crate::model::unit::{MarketingStatus, Unit, VacancyStatus};
use crate::model::ValidationError;
use crate::repo::unit_repo::{UnitListQuery, UnitRepository};
use crate::repo::{RecordId, RepoResult};
use crate::service::{parse_choice, required};
use serde::Deserialize;

const AREA_SCALE: u32 = 2;

/// Raw candidate values decoded from an API request body.
///
/// Numeric and date fields arrive as unvalidated text; the legacy admin
/// UI sends whatever the operator typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitPayload {
    pub name: Option<String>,
    pub building_id: Option<RecordId>,
    pub floor: Option<String>,
    pub marketing_status: Option<String>,
    pub vacancy_status: Option<String>,
    pub foreclosed: Option<bool>,
    pub contact_information: Option<String>,
    pub gross_floor_area: Option<String>,
    pub net_floor_area: Option<String>,
    pub floor_to_ceiling_height: Option<String>,
    pub ceiling_condition: Option<String>,
    pub floor_condition: Option<String>,
    pub partition_condition: Option<String>,
    pub lease_commencement_date: Option<String>,
    pub lease_expiry_date: Option<String>,
    pub asking_rent: Option<String>,
    pub allocated_parking_slot: Option<String>,
    pub price_per_parking_slot: Option<String>,
    pub minimum_period: Option<String>,
    pub escalation_rate: Option<String>,
    pub rent_free: Option<String>,
    pub dues: Option<String>,
    pub sale_price: Option<String>,
    pub sale_parking: Option<String>,
    pub unit_notes: Option<String>,
}

/// Normalizes a payload into a typed `Unit` and checks its invariants.
///
/// Structural problems (missing name/building, unknown status choice)
/// and range violations reject the payload; messy numeric/date text
/// resolves to absent fields.
pub fn normalize_and_validate(
    payload: &UnitPayload,
    config: &CoreConfig,
) -> Result<Unit, ValidationError> {
    let name = required(payload.name.as_deref(), "name")?;
    let building_id = payload
        .building_id
        .ok_or(ValidationError::MissingField { field: "building_id" })?;

    let zero = config.zero_integer_policy;
    let mut unit = Unit::new(name, building_id);

    if let Some(status) = parse_choice(
        payload.marketing_status.as_deref(),
        "marketing_status",
        MarketingStatus::parse,
    )? {
        unit.marketing_status = status;
    }
    if let Some(status) = parse_choice(
        payload.vacancy_status.as_deref(),
        "vacancy_status",
        VacancyStatus::parse,
    )? {
        unit.vacancy_status = status;
    }

    unit.foreclosed = payload.foreclosed.unwrap_or(false);
    unit.contact_information = payload.contact_information.clone();
    unit.floor = payload
        .floor
        .as_deref()
        .and_then(|text| coerce_integer_text(text, zero));
    unit.gross_floor_area = coerce_decimal_field(payload.gross_floor_area.as_deref());
    unit.net_floor_area = coerce_decimal_field(payload.net_floor_area.as_deref());
    unit.floor_to_ceiling_height = coerce_decimal_field(payload.floor_to_ceiling_height.as_deref());
    unit.ceiling_condition = payload.ceiling_condition.clone();
    unit.floor_condition = payload.floor_condition.clone();
    unit.partition_condition = payload.partition_condition.clone();
    unit.lease_commencement_date = payload
        .lease_commencement_date
        .as_deref()
        .and_then(coerce_date_text);
    unit.lease_expiry_date = payload
        .lease_expiry_date
        .as_deref()
        .and_then(coerce_date_text);
    unit.asking_rent = coerce_decimal_field(payload.asking_rent.as_deref());
    unit.allocated_parking_slot = payload
        .allocated_parking_slot
        .as_deref()
        .and_then(|text| coerce_integer_text(text, zero));
    unit.price_per_parking_slot = coerce_decimal_field(payload.price_per_parking_slot.as_deref());
    unit.minimum_period = payload.minimum_period.clone();
    unit.escalation_rate = coerce_decimal_field(payload.escalation_rate.as_deref());
    unit.rent_free = payload.rent_free.clone();
    unit.dues = coerce_decimal_field(payload.dues.as_deref());
    unit.sale_price = coerce_decimal_field(payload.sale_price.as_deref());
    unit.sale_parking = payload.sale_parking.clone();
    unit.unit_notes = payload.unit_notes.clone();

    unit.validate()?;
    Ok(unit)
}

fn coerce_decimal_field(text: Option<&str>) -> Option<rust_decimal::Decimal> {
    text.and_then(|value| coerce_decimal_text(value, AREA_SCALE))
}

/// Use-case service wrapper for unit CRUD operations.
pub struct UnitService<R: UnitRepository> {
    repo: R,
    config: CoreConfig,
}

impl<R: UnitRepository> UnitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R, config: CoreConfig) -> Self {
        Self { repo, config }
    }

    /// Normalizes and persists a new unit from an API payload.
    pub fn create_from_payload(&self, payload: &UnitPayload) -> RepoResult<RecordId> {
        let unit = normalize_and_validate(payload, &self.config)?;
        self.repo.create_unit(&unit)
    }

    /// Normalizes an API payload and updates the unit with the given ID.
    pub fn update_from_payload(&self, id: RecordId, payload: &UnitPayload) -> RepoResult<()> {
        let mut unit = normalize_and_validate(payload, &self.config)?;
        unit.id = id;
        self.repo.update_unit(&unit)
    }

    pub fn create_unit(&self, unit: &Unit) -> RepoResult<RecordId> {
        self.repo.create_unit(unit)
    }

    pub fn update_unit(&self, unit: &Unit) -> RepoResult<()> {
        self.repo.update_unit(unit)
    }

    pub fn get_unit(&self, id: RecordId) -> RepoResult<Option<Unit>> {
        self.repo.get_unit(id)
    }

    pub fn list_units(&self, query: &UnitListQuery) -> RepoResult<Vec<Unit>> {
        self.repo.list_units(query)
    }

    pub fn delete_unit(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_unit(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_and_validate, UnitPayload};
    use crate::config::CoreConfig;
    use crate::model::ValidationError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn junk_numeric_text_resolves_to_absent() {
        let payload = UnitPayload {
            name: Some("Penthouse".to_string()),
            building_id: Some(1),
            gross_floor_area: Some("1 ,200.00sqm".to_string()),
            net_floor_area: Some("n/a".to_string()),
            ..UnitPayload::default()
        };

        let unit = normalize_and_validate(&payload, &CoreConfig::default()).unwrap();
        assert_eq!(
            unit.gross_floor_area,
            Some(Decimal::from_str("1200.00").unwrap())
        );
        assert_eq!(unit.net_floor_area, None);
    }

    #[test]
    fn missing_name_is_rejected() {
        let payload = UnitPayload {
            building_id: Some(1),
            ..UnitPayload::default()
        };
        assert_eq!(
            normalize_and_validate(&payload, &CoreConfig::default()).unwrap_err(),
            ValidationError::MissingField { field: "name" }
        );
    }

    #[test]
    fn unknown_status_choice_is_rejected() {
        let payload = UnitPayload {
            name: Some("5F".to_string()),
            building_id: Some(1),
            marketing_status: Some("raffle".to_string()),
            ..UnitPayload::default()
        };
        assert!(matches!(
            normalize_and_validate(&payload, &CoreConfig::default()),
            Err(ValidationError::InvalidChoice {
                field: "marketing_status",
                ..
            })
        ));
    }

    #[test]
    fn zero_date_lease_expiry_skips_range_check() {
        let payload = UnitPayload {
            name: Some("5F".to_string()),
            building_id: Some(1),
            lease_commencement_date: Some("2024-03-01".to_string()),
            lease_expiry_date: Some("0000-00-00".to_string()),
            ..UnitPayload::default()
        };

        let unit = normalize_and_validate(&payload, &CoreConfig::default()).unwrap();
        assert!(unit.lease_commencement_date.is_some());
        assert_eq!(unit.lease_expiry_date, None);
    }

    #[test]
    fn inverted_floor_areas_are_rejected() {
        let payload = UnitPayload {
            name: Some("5F".to_string()),
            building_id: Some(1),
            gross_floor_area: Some("50".to_string()),
            net_floor_area: Some("100".to_string()),
            ..UnitPayload::default()
        };
        assert!(matches!(
            normalize_and_validate(&payload, &CoreConfig::default()),
            Err(ValidationError::RangeOrder {
                minimum_field: "net_floor_area",
                ..
            })
        ));
    }
}
