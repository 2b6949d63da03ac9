//! Building repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the legacy `buildings` storage.
//! - Coerce legacy text columns into typed optionals on every read.
//!
//! # Invariants
//! - `last_edited` is refreshed by the storage layer on every update.
//! - Every legacy column is coerced exactly once per row read.

use crate::coerce::numeric::ZeroPolicy;
use crate::coerce::temporal::TemporalPolicy;
use crate::config::CoreConfig;
use crate::model::building::Building;
use crate::repo::{
    bool_to_int, decimal_to_db, int_to_bool, read_decimal, read_integer, read_timestamp,
    RecordId, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const BUILDING_SELECT_SQL: &str = "SELECT
    id,
    name,
    address_id,
    year_built,
    is_for_sale,
    is_peza_certified,
    is_strata,
    grade,
    typical_floor_plate_area,
    floor_to_ceiling_height,
    number_of_floors,
    parking_floors,
    passenger_elevators,
    service_elevators,
    ac_type,
    ac_operating_hours_charge,
    office_rent,
    association_dues,
    floor_area_ratio,
    gross_floor_area,
    gross_leasable_area,
    building_type,
    space_for_lease,
    space_for_sale,
    space_occupied,
    created_by,
    created_at,
    last_edited
FROM buildings";

const MONEY_SCALE: u32 = 2;

/// Query options for listing buildings.
#[derive(Debug, Clone, Default)]
pub struct BuildingListQuery {
    pub is_for_sale: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for building CRUD operations.
pub trait BuildingRepository {
    fn create_building(&self, building: &Building) -> RepoResult<RecordId>;
    fn update_building(&self, building: &Building) -> RepoResult<()>;
    fn get_building(&self, id: RecordId) -> RepoResult<Option<Building>>;
    fn list_buildings(&self, query: &BuildingListQuery) -> RepoResult<Vec<Building>>;
    fn delete_building(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed building repository.
pub struct SqliteBuildingRepository<'conn> {
    conn: &'conn Connection,
    temporal: TemporalPolicy,
    zero: ZeroPolicy,
}

impl<'conn> SqliteBuildingRepository<'conn> {
    pub fn new(conn: &'conn Connection, config: &CoreConfig) -> Self {
        Self {
            conn,
            temporal: config.temporal_policy(),
            zero: config.zero_integer_policy,
        }
    }
}

impl BuildingRepository for SqliteBuildingRepository<'_> {
    fn create_building(&self, building: &Building) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO buildings (
                name, address_id, year_built, is_for_sale,
                is_peza_certified, is_strata, grade,
                typical_floor_plate_area, floor_to_ceiling_height,
                number_of_floors, parking_floors, passenger_elevators,
                service_elevators, ac_type, ac_operating_hours_charge,
                office_rent, association_dues, floor_area_ratio,
                gross_floor_area, gross_leasable_area, building_type,
                space_for_lease, space_for_sale, space_occupied, created_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                      ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                      ?23, ?24, ?25);",
            params![
                building.name.as_str(),
                building.address_id,
                building.year_built,
                bool_to_int(building.is_for_sale),
                bool_to_int(building.is_peza_certified),
                bool_to_int(building.is_strata),
                building.grade.as_deref(),
                decimal_to_db(building.typical_floor_plate_area),
                decimal_to_db(building.floor_to_ceiling_height),
                building.number_of_floors,
                building.parking_floors,
                building.passenger_elevators,
                building.service_elevators,
                building.ac_type.as_deref(),
                decimal_to_db(building.ac_operating_hours_charge),
                decimal_to_db(building.office_rent),
                decimal_to_db(building.association_dues),
                decimal_to_db(building.floor_area_ratio),
                decimal_to_db(building.gross_floor_area),
                decimal_to_db(building.gross_leasable_area),
                building.building_type.as_deref(),
                decimal_to_db(building.space_for_lease),
                decimal_to_db(building.space_for_sale),
                decimal_to_db(building.space_occupied),
                building.created_by,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_building(&self, building: &Building) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE buildings
             SET
                name = ?1,
                address_id = ?2,
                year_built = ?3,
                is_for_sale = ?4,
                is_peza_certified = ?5,
                is_strata = ?6,
                grade = ?7,
                typical_floor_plate_area = ?8,
                floor_to_ceiling_height = ?9,
                number_of_floors = ?10,
                parking_floors = ?11,
                passenger_elevators = ?12,
                service_elevators = ?13,
                ac_type = ?14,
                ac_operating_hours_charge = ?15,
                office_rent = ?16,
                association_dues = ?17,
                floor_area_ratio = ?18,
                gross_floor_area = ?19,
                gross_leasable_area = ?20,
                building_type = ?21,
                space_for_lease = ?22,
                space_for_sale = ?23,
                space_occupied = ?24,
                last_edited = strftime('%Y-%m-%d %H:%M:%S', 'now')
             WHERE id = ?25;",
            params![
                building.name.as_str(),
                building.address_id,
                building.year_built,
                bool_to_int(building.is_for_sale),
                bool_to_int(building.is_peza_certified),
                bool_to_int(building.is_strata),
                building.grade.as_deref(),
                decimal_to_db(building.typical_floor_plate_area),
                decimal_to_db(building.floor_to_ceiling_height),
                building.number_of_floors,
                building.parking_floors,
                building.passenger_elevators,
                building.service_elevators,
                building.ac_type.as_deref(),
                decimal_to_db(building.ac_operating_hours_charge),
                decimal_to_db(building.office_rent),
                decimal_to_db(building.association_dues),
                decimal_to_db(building.floor_area_ratio),
                decimal_to_db(building.gross_floor_area),
                decimal_to_db(building.gross_leasable_area),
                building.building_type.as_deref(),
                decimal_to_db(building.space_for_lease),
                decimal_to_db(building.space_for_sale),
                decimal_to_db(building.space_occupied),
                building.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "building",
                id: building.id,
            });
        }

        Ok(())
    }

    fn get_building(&self, id: RecordId) -> RepoResult<Option<Building>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUILDING_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_building_row(row)?));
        }

        Ok(None)
    }

    fn list_buildings(&self, query: &BuildingListQuery) -> RepoResult<Vec<Building>> {
        let mut sql = format!("{BUILDING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(is_for_sale) = query.is_for_sale {
            sql.push_str(" AND is_for_sale = ?");
            bind_values.push(Value::Integer(bool_to_int(is_for_sale)));
        }

        sql.push_str(" ORDER BY name ASC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut buildings = Vec::new();

        while let Some(row) = rows.next()? {
            buildings.push(self.parse_building_row(row)?);
        }

        Ok(buildings)
    }

    fn delete_building(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM buildings WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "building",
                id,
            });
        }

        Ok(())
    }
}

impl SqliteBuildingRepository<'_> {
    fn parse_building_row(&self, row: &Row<'_>) -> RepoResult<Building> {
        Ok(Building {
            id: row.get("id")?,
            name: row.get("name")?,
            address_id: row.get("address_id")?,
            year_built: read_integer(row, "year_built", self.zero)?,
            is_for_sale: int_to_bool("buildings", "is_for_sale", row.get("is_for_sale")?)?,
            is_peza_certified: int_to_bool(
                "buildings",
                "is_peza_certified",
                row.get("is_peza_certified")?,
            )?,
            is_strata: int_to_bool("buildings", "is_strata", row.get("is_strata")?)?,
            grade: row.get("grade")?,
            typical_floor_plate_area: read_decimal(row, "typical_floor_plate_area", MONEY_SCALE)?,
            floor_to_ceiling_height: read_decimal(row, "floor_to_ceiling_height", MONEY_SCALE)?,
            number_of_floors: read_integer(row, "number_of_floors", self.zero)?,
            parking_floors: read_integer(row, "parking_floors", self.zero)?,
            passenger_elevators: read_integer(row, "passenger_elevators", self.zero)?,
            service_elevators: read_integer(row, "service_elevators", self.zero)?,
            ac_type: row.get("ac_type")?,
            ac_operating_hours_charge: read_decimal(row, "ac_operating_hours_charge", MONEY_SCALE)?,
            office_rent: read_decimal(row, "office_rent", MONEY_SCALE)?,
            association_dues: read_decimal(row, "association_dues", MONEY_SCALE)?,
            floor_area_ratio: read_decimal(row, "floor_area_ratio", MONEY_SCALE)?,
            gross_floor_area: read_decimal(row, "gross_floor_area", MONEY_SCALE)?,
            gross_leasable_area: read_decimal(row, "gross_leasable_area", MONEY_SCALE)?,
            building_type: row.get("building_type")?,
            space_for_lease: read_decimal(row, "space_for_lease", MONEY_SCALE)?,
            space_for_sale: read_decimal(row, "space_for_sale", MONEY_SCALE)?,
            space_occupied: read_decimal(row, "space_occupied", MONEY_SCALE)?,
            created_by: row.get("created_by")?,
            created_at: read_timestamp(row, "created_at", &self.temporal)?,
            last_edited: read_timestamp(row, "last_edited", &self.temporal)?,
        })
    }
}
