//! Building domain model.
//!
//! The legacy `buildings` table stores most measurements as text; all
//! numeric fields here are optional because tolerant coercion may resolve
//! any of them to "unknown".

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical building record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: i64,
    pub name: String,
    pub address_id: Option<i64>,
    pub year_built: Option<i64>,
    pub is_for_sale: bool,
    pub is_peza_certified: bool,
    pub is_strata: bool,
    pub grade: Option<String>,
    pub typical_floor_plate_area: Option<Decimal>,
    pub floor_to_ceiling_height: Option<Decimal>,
    pub number_of_floors: Option<i64>,
    pub parking_floors: Option<i64>,
    pub passenger_elevators: Option<i64>,
    pub service_elevators: Option<i64>,
    pub ac_type: Option<String>,
    pub ac_operating_hours_charge: Option<Decimal>,
    pub office_rent: Option<Decimal>,
    pub association_dues: Option<Decimal>,
    pub floor_area_ratio: Option<Decimal>,
    pub gross_floor_area: Option<Decimal>,
    pub gross_leasable_area: Option<Decimal>,
    pub building_type: Option<String>,
    pub space_for_lease: Option<Decimal>,
    pub space_for_sale: Option<Decimal>,
    pub space_occupied: Option<Decimal>,
    pub created_by: Option<i64>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub last_edited: Option<DateTime<FixedOffset>>,
}

impl Building {
    /// Creates a named building with every optional attribute unset.
    ///
    /// The `id` is assigned by storage on create; `0` marks an
    /// unpersisted record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address_id: None,
            year_built: None,
            is_for_sale: false,
            is_peza_certified: false,
            is_strata: false,
            grade: None,
            typical_floor_plate_area: None,
            floor_to_ceiling_height: None,
            number_of_floors: None,
            parking_floors: None,
            passenger_elevators: None,
            service_elevators: None,
            ac_type: None,
            ac_operating_hours_charge: None,
            office_rent: None,
            association_dues: None,
            floor_area_ratio: None,
            gross_floor_area: None,
            gross_leasable_area: None,
            building_type: None,
            space_for_lease: None,
            space_for_sale: None,
            space_occupied: None,
            created_by: None,
            created_at: None,
            last_edited: None,
        }
    }
}
