//! Unit domain model.
//!
//! # Invariants
//! - `net_floor_area` must not exceed `gross_floor_area` when both are
//!   present.
//! - `lease_commencement_date` must not be after `lease_expiry_date` when
//!   both are present.

use crate::model::{check_range_pair, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a unit is currently marketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketingStatus {
    Lease,
    Sale,
    LeaseSale,
    Unknown,
}

impl MarketingStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Lease => "lease",
            Self::Sale => "sale",
            Self::LeaseSale => "lease_sale",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lease" => Some(Self::Lease),
            "sale" => Some(Self::Sale),
            "lease_sale" => Some(Self::LeaseSale),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Occupancy state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    Vacant,
    Occupied,
}

impl VacancyStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Vacant => "vacant",
            Self::Occupied => "occupied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vacant" => Some(Self::Vacant),
            "occupied" => Some(Self::Occupied),
            _ => None,
        }
    }
}

/// Canonical unit record.
///
/// Floor areas, rents and parking figures live in legacy text columns;
/// they surface here as typed optionals after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub building_id: i64,
    pub floor: Option<i64>,
    pub marketing_status: MarketingStatus,
    pub vacancy_status: VacancyStatus,
    pub foreclosed: bool,
    pub contact_information: Option<String>,
    pub gross_floor_area: Option<Decimal>,
    pub net_floor_area: Option<Decimal>,
    pub floor_to_ceiling_height: Option<Decimal>,
    pub ceiling_condition: Option<String>,
    pub floor_condition: Option<String>,
    pub partition_condition: Option<String>,
    pub lease_commencement_date: Option<NaiveDate>,
    pub lease_expiry_date: Option<NaiveDate>,
    pub asking_rent: Option<Decimal>,
    pub allocated_parking_slot: Option<i64>,
    pub price_per_parking_slot: Option<Decimal>,
    pub minimum_period: Option<String>,
    pub escalation_rate: Option<Decimal>,
    pub rent_free: Option<String>,
    pub dues: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub sale_parking: Option<String>,
    pub unit_notes: Option<String>,
}

impl Unit {
    /// Creates a unit in its default marketing state with every optional
    /// attribute unset.
    pub fn new(name: impl Into<String>, building_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            building_id,
            floor: None,
            marketing_status: MarketingStatus::Unknown,
            vacancy_status: VacancyStatus::Vacant,
            foreclosed: false,
            contact_information: None,
            gross_floor_area: None,
            net_floor_area: None,
            floor_to_ceiling_height: None,
            ceiling_condition: None,
            floor_condition: None,
            partition_condition: None,
            lease_commencement_date: None,
            lease_expiry_date: None,
            asking_rent: None,
            allocated_parking_slot: None,
            price_per_parking_slot: None,
            minimum_period: None,
            escalation_rate: None,
            rent_free: None,
            dues: None,
            sale_price: None,
            sale_parking: None,
            unit_notes: None,
        }
    }

    /// Checks the unit's declared range pairs.
    ///
    /// # Errors
    /// - `RangeOrder` naming `net_floor_area`/`gross_floor_area` when the
    ///   net figure exceeds the gross figure.
    /// - `RangeOrder` naming the lease date fields when commencement is
    ///   after expiry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range_pair(
            self.net_floor_area.as_ref(),
            self.gross_floor_area.as_ref(),
            "net_floor_area",
            "gross_floor_area",
        )?;
        check_range_pair(
            self.lease_commencement_date.as_ref(),
            self.lease_expiry_date.as_ref(),
            "lease_commencement_date",
            "lease_expiry_date",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Unit;
    use crate::model::ValidationError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn net_exceeding_gross_is_rejected() {
        let mut unit = Unit::new("5F", 1);
        unit.gross_floor_area = Some(Decimal::new(10000, 2));
        unit.net_floor_area = Some(Decimal::new(12000, 2));
        let err = unit.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::RangeOrder {
                minimum_field: "net_floor_area",
                maximum_field: "gross_floor_area",
            }
        );
    }

    #[test]
    fn absent_gross_area_skips_the_check() {
        let mut unit = Unit::new("5F", 1);
        unit.net_floor_area = Some(Decimal::new(12000, 2));
        assert!(unit.validate().is_ok());
    }

    #[test]
    fn inverted_lease_dates_are_rejected() {
        let mut unit = Unit::new("5F", 1);
        unit.lease_commencement_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        unit.lease_expiry_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(matches!(
            unit.validate(),
            Err(ValidationError::RangeOrder {
                minimum_field: "lease_commencement_date",
                ..
            })
        ));
    }
}
