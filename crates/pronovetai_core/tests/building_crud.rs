use pronovetai_core::db::open_db_in_memory;
use pronovetai_core::{
    Building, BuildingListQuery, BuildingRepository, CoreConfig, RepoError,
    SqliteBuildingRepository,
};
use rusqlite::params;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn create_get_update_delete() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteBuildingRepository::new(&conn, &config);

    let mut building = Building::new("Pacific Star");
    building.year_built = Some(1989);
    building.number_of_floors = Some(28);
    building.office_rent = Some(Decimal::from_str("850.00").unwrap());
    building.is_for_sale = true;

    let id = repo.create_building(&building).unwrap();
    let loaded = repo.get_building(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Pacific Star");
    assert_eq!(loaded.year_built, Some(1989));
    assert_eq!(loaded.office_rent, Some(Decimal::from_str("850.00").unwrap()));
    assert!(loaded.is_for_sale);
    assert!(loaded.created_at.is_some());
    assert!(loaded.last_edited.is_some());

    building.id = id;
    building.grade = Some("A".to_string());
    repo.update_building(&building).unwrap();
    let updated = repo.get_building(id).unwrap().unwrap();
    assert_eq!(updated.grade.as_deref(), Some("A"));
    assert!(updated.last_edited.is_some());

    repo.delete_building(id).unwrap();
    assert!(repo.get_building(id).unwrap().is_none());
    assert!(matches!(
        repo.update_building(&building).unwrap_err(),
        RepoError::NotFound {
            entity: "building",
            ..
        }
    ));
}

#[test]
fn legacy_text_row_is_coerced_on_read() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO buildings (
            name, year_built, number_of_floors, parking_floors,
            gross_floor_area, floor_area_ratio, created_at
        ) VALUES ('Legacy Tower', '1987 (est.)', '0', '',
                  '52 ,000.00sqm', 'n/a', '0000-00-00 00:00:00');",
        [],
    )
    .unwrap();

    let config = CoreConfig::default();
    let repo = SqliteBuildingRepository::new(&conn, &config);
    let buildings = repo.list_buildings(&BuildingListQuery::default()).unwrap();
    assert_eq!(buildings.len(), 1);

    let building = &buildings[0];
    assert_eq!(building.year_built, Some(1987));
    // Text "0" floor count reads as unknown under the default policy.
    assert_eq!(building.number_of_floors, None);
    assert_eq!(building.parking_floors, None);
    assert_eq!(
        building.gross_floor_area,
        Some(Decimal::from_str("52000.00").unwrap())
    );
    assert_eq!(building.floor_area_ratio, None);
    // Zero-date created_at sentinel reads as absent.
    assert_eq!(building.created_at, None);
}

#[test]
fn list_filters_on_sale_flag() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteBuildingRepository::new(&conn, &config);

    let mut for_sale = Building::new("Alpha");
    for_sale.is_for_sale = true;
    repo.create_building(&for_sale).unwrap();
    repo.create_building(&Building::new("Beta")).unwrap();

    let query = BuildingListQuery {
        is_for_sale: Some(true),
        ..BuildingListQuery::default()
    };
    let listed = repo.list_buildings(&query).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Alpha");
}

#[test]
fn deleting_building_cascades_to_units() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteBuildingRepository::new(&conn, &config);

    let id = repo.create_building(&Building::new("Gamma")).unwrap();
    conn.execute(
        "INSERT INTO units (name, building_id) VALUES ('G-1', ?1);",
        params![id],
    )
    .unwrap();

    repo.delete_building(id).unwrap();
    let orphans: i64 = conn
        .query_row("SELECT COUNT(*) FROM units;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}
