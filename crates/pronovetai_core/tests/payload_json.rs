use pronovetai_core::db::open_db_in_memory;
use pronovetai_core::{
    Building, BuildingRepository, CoreConfig, OdFormPayload, SqliteBuildingRepository,
    SqliteUnitRepository, UnitPayload, UnitService,
};
use pronovetai_core::service::od_form_service;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn unit_json_body_flows_through_to_storage() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let buildings = SqliteBuildingRepository::new(&conn, &config);
    let building_id = buildings.create_building(&Building::new("JSON Tower")).unwrap();

    let body = format!(
        r#"{{
            "name": "10F Unit B",
            "building_id": {building_id},
            "floor": "10th flr",
            "gross_floor_area": "1 ,200.00sqm",
            "net_floor_area": "",
            "marketing_status": "lease",
            "lease_expiry_date": "0000-00-00"
        }}"#
    );
    let payload: UnitPayload = serde_json::from_str(&body).unwrap();

    let service = UnitService::new(SqliteUnitRepository::new(&conn, &config), config);
    let id = service.create_from_payload(&payload).unwrap();
    let unit = service.get_unit(id).unwrap().unwrap();

    assert_eq!(unit.floor, Some(10));
    assert_eq!(
        unit.gross_floor_area,
        Some(Decimal::from_str("1200.00").unwrap())
    );
    assert_eq!(unit.net_floor_area, None);
    assert_eq!(unit.lease_expiry_date, None);
}

#[test]
fn od_form_json_body_normalizes() {
    let body = r#"{
        "type_of_call": "inbound",
        "source_of_call": "website",
        "type_of_caller": "broker",
        "intent": "rent",
        "purpose": "new_office",
        "budget_minimum": "45,000.00",
        "budget_maximum": "90,000.00php",
        "date": "2024-02-01 09:30:00"
    }"#;
    let payload: OdFormPayload = serde_json::from_str(body).unwrap();

    let form = od_form_service::normalize_and_validate(&payload, &CoreConfig::default()).unwrap();
    assert_eq!(form.budget_minimum, Some(Decimal::from(45000)));
    assert_eq!(form.budget_maximum, Some(Decimal::from(90000)));
    assert!(form.date.is_some());
}

#[test]
fn unknown_json_fields_are_ignored() {
    let body = r#"{
        "name": "3F",
        "building_id": 1,
        "legacy_field_nobody_remembers": "junk"
    }"#;
    let payload: UnitPayload = serde_json::from_str(body).unwrap();
    assert_eq!(payload.name.as_deref(), Some("3F"));
}
