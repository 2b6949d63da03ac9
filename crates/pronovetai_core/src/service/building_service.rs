//! Building use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for buildings.
//! - Turn raw API payloads into typed `Building` records.

use crate::coerce::numeric::{coerce_decimal_text, coerce_integer_text};
use crate::config::CoreConfig;
use crate::model::building::Building;
use crate::model::ValidationError;
use crate::repo::building_repo::{BuildingListQuery, BuildingRepository};
use crate::repo::{RecordId, RepoResult};
use crate::service::required;
use serde::Deserialize;

const MONEY_SCALE: u32 = 2;

/// Raw candidate values decoded from an API request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildingPayload {
    pub name: Option<String>,
    pub address_id: Option<RecordId>,
    pub year_built: Option<String>,
    pub is_for_sale: Option<bool>,
    pub is_peza_certified: Option<bool>,
    pub is_strata: Option<bool>,
    pub grade: Option<String>,
    pub typical_floor_plate_area: Option<String>,
    pub floor_to_ceiling_height: Option<String>,
    pub number_of_floors: Option<String>,
    pub parking_floors: Option<String>,
    pub passenger_elevators: Option<String>,
    pub service_elevators: Option<String>,
    pub ac_type: Option<String>,
    pub ac_operating_hours_charge: Option<String>,
    pub office_rent: Option<String>,
    pub association_dues: Option<String>,
    pub floor_area_ratio: Option<String>,
    pub gross_floor_area: Option<String>,
    pub gross_leasable_area: Option<String>,
    pub building_type: Option<String>,
    pub space_for_lease: Option<String>,
    pub space_for_sale: Option<String>,
    pub space_occupied: Option<String>,
    pub created_by: Option<RecordId>,
}

/// Normalizes a payload into a typed `Building`.
///
/// Only the name is structurally required; every measurement tolerates
/// legacy junk and resolves to absent on failure.
pub fn normalize_and_validate(
    payload: &BuildingPayload,
    config: &CoreConfig,
) -> Result<Building, ValidationError> {
    let name = required(payload.name.as_deref(), "name")?;
    let zero = config.zero_integer_policy;

    let mut building = Building::new(name);
    building.address_id = payload.address_id;
    building.year_built = coerce_int(payload.year_built.as_deref(), zero);
    building.is_for_sale = payload.is_for_sale.unwrap_or(false);
    building.is_peza_certified = payload.is_peza_certified.unwrap_or(false);
    building.is_strata = payload.is_strata.unwrap_or(false);
    building.grade = payload.grade.clone();
    building.typical_floor_plate_area = coerce_dec(payload.typical_floor_plate_area.as_deref());
    building.floor_to_ceiling_height = coerce_dec(payload.floor_to_ceiling_height.as_deref());
    building.number_of_floors = coerce_int(payload.number_of_floors.as_deref(), zero);
    building.parking_floors = coerce_int(payload.parking_floors.as_deref(), zero);
    building.passenger_elevators = coerce_int(payload.passenger_elevators.as_deref(), zero);
    building.service_elevators = coerce_int(payload.service_elevators.as_deref(), zero);
    building.ac_type = payload.ac_type.clone();
    building.ac_operating_hours_charge = coerce_dec(payload.ac_operating_hours_charge.as_deref());
    building.office_rent = coerce_dec(payload.office_rent.as_deref());
    building.association_dues = coerce_dec(payload.association_dues.as_deref());
    building.floor_area_ratio = coerce_dec(payload.floor_area_ratio.as_deref());
    building.gross_floor_area = coerce_dec(payload.gross_floor_area.as_deref());
    building.gross_leasable_area = coerce_dec(payload.gross_leasable_area.as_deref());
    building.building_type = payload.building_type.clone();
    building.space_for_lease = coerce_dec(payload.space_for_lease.as_deref());
    building.space_for_sale = coerce_dec(payload.space_for_sale.as_deref());
    building.space_occupied = coerce_dec(payload.space_occupied.as_deref());
    building.created_by = payload.created_by;

    Ok(building)
}

fn coerce_int(
    text: Option<&str>,
    zero: crate::coerce::numeric::ZeroPolicy,
) -> Option<i64> {
    text.and_then(|value| coerce_integer_text(value, zero))
}

fn coerce_dec(text: Option<&str>) -> Option<rust_decimal::Decimal> {
    text.and_then(|value| coerce_decimal_text(value, MONEY_SCALE))
}

/// Use-case service wrapper for building CRUD operations.
pub struct BuildingService<R: BuildingRepository> {
    repo: R,
    config: CoreConfig,
}

impl<R: BuildingRepository> BuildingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R, config: CoreConfig) -> Self {
        Self { repo, config }
    }

    /// Normalizes and persists a new building from an API payload.
    pub fn create_from_payload(&self, payload: &BuildingPayload) -> RepoResult<RecordId> {
        let building = normalize_and_validate(payload, &self.config)?;
        self.repo.create_building(&building)
    }

    /// Normalizes an API payload and updates the building with the given
    /// ID.
    pub fn update_from_payload(&self, id: RecordId, payload: &BuildingPayload) -> RepoResult<()> {
        let mut building = normalize_and_validate(payload, &self.config)?;
        building.id = id;
        self.repo.update_building(&building)
    }

    pub fn create_building(&self, building: &Building) -> RepoResult<RecordId> {
        self.repo.create_building(building)
    }

    pub fn update_building(&self, building: &Building) -> RepoResult<()> {
        self.repo.update_building(building)
    }

    pub fn get_building(&self, id: RecordId) -> RepoResult<Option<Building>> {
        self.repo.get_building(id)
    }

    pub fn list_buildings(&self, query: &BuildingListQuery) -> RepoResult<Vec<Building>> {
        self.repo.list_buildings(query)
    }

    pub fn delete_building(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_building(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_and_validate, BuildingPayload};
    use crate::config::CoreConfig;
    use crate::model::ValidationError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn messy_measurements_resolve_tolerantly() {
        let payload = BuildingPayload {
            name: Some("One Corporate Centre".to_string()),
            year_built: Some("1998 (est.)".to_string()),
            number_of_floors: Some("45 floors".to_string()),
            parking_floors: Some("".to_string()),
            gross_floor_area: Some("52 ,000.00sqm".to_string()),
            floor_area_ratio: Some("n/a".to_string()),
            ..BuildingPayload::default()
        };

        let building = normalize_and_validate(&payload, &CoreConfig::default()).unwrap();
        assert_eq!(building.year_built, Some(1998));
        assert_eq!(building.number_of_floors, Some(45));
        assert_eq!(building.parking_floors, None);
        assert_eq!(
            building.gross_floor_area,
            Some(Decimal::from_str("52000.00").unwrap())
        );
        assert_eq!(building.floor_area_ratio, None);
    }

    #[test]
    fn missing_name_is_rejected() {
        let payload = BuildingPayload::default();
        assert_eq!(
            normalize_and_validate(&payload, &CoreConfig::default()).unwrap_err(),
            ValidationError::MissingField { field: "name" }
        );
    }
}
