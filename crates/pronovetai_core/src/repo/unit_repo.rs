//! Unit repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the legacy `units` storage.
//! - Coerce legacy text columns into typed optionals on every read.
//!
//! # Invariants
//! - Write paths call `Unit::validate()` before SQL mutations.
//! - Every legacy column is coerced exactly once per row read.

use crate::coerce::numeric::ZeroPolicy;
use crate::config::CoreConfig;
use crate::model::unit::{MarketingStatus, Unit, VacancyStatus};
use crate::repo::{
    bool_to_int, date_to_db, decimal_to_db, int_to_bool, read_date, read_decimal, read_integer,
    RecordId, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const UNIT_SELECT_SQL: &str = "SELECT
    id,
    name,
    building_id,
    floor,
    marketing_status,
    vacancy_status,
    foreclosed,
    contact_information,
    gross_floor_area,
    net_floor_area,
    floor_to_ceiling_height,
    ceiling_condition,
    floor_condition,
    partition_condition,
    lease_commencement_date,
    lease_expiry_date,
    asking_rent,
    allocated_parking_slot,
    price_per_parking_slot,
    minimum_period,
    escalation_rate,
    rent_free,
    dues,
    sale_price,
    sale_parking,
    unit_notes
FROM units";

/// Monetary and area columns carry two decimal places in the canonical
/// schema.
const MONEY_SCALE: u32 = 2;

/// Query options for listing units.
#[derive(Debug, Clone, Default)]
pub struct UnitListQuery {
    pub building_id: Option<RecordId>,
    pub marketing_status: Option<MarketingStatus>,
    pub vacancy_status: Option<VacancyStatus>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for unit CRUD operations.
pub trait UnitRepository {
    fn create_unit(&self, unit: &Unit) -> RepoResult<RecordId>;
    fn update_unit(&self, unit: &Unit) -> RepoResult<()>;
    fn get_unit(&self, id: RecordId) -> RepoResult<Option<Unit>>;
    fn list_units(&self, query: &UnitListQuery) -> RepoResult<Vec<Unit>>;
    fn delete_unit(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed unit repository.
pub struct SqliteUnitRepository<'conn> {
    conn: &'conn Connection,
    zero: ZeroPolicy,
}

impl<'conn> SqliteUnitRepository<'conn> {
    pub fn new(conn: &'conn Connection, config: &CoreConfig) -> Self {
        Self {
            conn,
            zero: config.zero_integer_policy,
        }
    }
}

impl UnitRepository for SqliteUnitRepository<'_> {
    fn create_unit(&self, unit: &Unit) -> RepoResult<RecordId> {
        unit.validate()?;

        self.conn.execute(
            "INSERT INTO units (
                name, building_id, floor, marketing_status, vacancy_status,
                foreclosed, contact_information, gross_floor_area,
                net_floor_area, floor_to_ceiling_height, ceiling_condition,
                floor_condition, partition_condition,
                lease_commencement_date, lease_expiry_date, asking_rent,
                allocated_parking_slot, price_per_parking_slot,
                minimum_period, escalation_rate, rent_free, dues,
                sale_price, sale_parking, unit_notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                      ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                      ?23, ?24, ?25);",
            params![
                unit.name.as_str(),
                unit.building_id,
                unit.floor,
                unit.marketing_status.as_db(),
                unit.vacancy_status.as_db(),
                bool_to_int(unit.foreclosed),
                unit.contact_information.as_deref(),
                decimal_to_db(unit.gross_floor_area),
                decimal_to_db(unit.net_floor_area),
                decimal_to_db(unit.floor_to_ceiling_height),
                unit.ceiling_condition.as_deref(),
                unit.floor_condition.as_deref(),
                unit.partition_condition.as_deref(),
                date_to_db(unit.lease_commencement_date),
                date_to_db(unit.lease_expiry_date),
                decimal_to_db(unit.asking_rent),
                unit.allocated_parking_slot,
                decimal_to_db(unit.price_per_parking_slot),
                unit.minimum_period.as_deref(),
                decimal_to_db(unit.escalation_rate),
                unit.rent_free.as_deref(),
                decimal_to_db(unit.dues),
                decimal_to_db(unit.sale_price),
                unit.sale_parking.as_deref(),
                unit.unit_notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_unit(&self, unit: &Unit) -> RepoResult<()> {
        unit.validate()?;

        let changed = self.conn.execute(
            "UPDATE units
             SET
                name = ?1,
                building_id = ?2,
                floor = ?3,
                marketing_status = ?4,
                vacancy_status = ?5,
                foreclosed = ?6,
                contact_information = ?7,
                gross_floor_area = ?8,
                net_floor_area = ?9,
                floor_to_ceiling_height = ?10,
                ceiling_condition = ?11,
                floor_condition = ?12,
                partition_condition = ?13,
                lease_commencement_date = ?14,
                lease_expiry_date = ?15,
                asking_rent = ?16,
                allocated_parking_slot = ?17,
                price_per_parking_slot = ?18,
                minimum_period = ?19,
                escalation_rate = ?20,
                rent_free = ?21,
                dues = ?22,
                sale_price = ?23,
                sale_parking = ?24,
                unit_notes = ?25
             WHERE id = ?26;",
            params![
                unit.name.as_str(),
                unit.building_id,
                unit.floor,
                unit.marketing_status.as_db(),
                unit.vacancy_status.as_db(),
                bool_to_int(unit.foreclosed),
                unit.contact_information.as_deref(),
                decimal_to_db(unit.gross_floor_area),
                decimal_to_db(unit.net_floor_area),
                decimal_to_db(unit.floor_to_ceiling_height),
                unit.ceiling_condition.as_deref(),
                unit.floor_condition.as_deref(),
                unit.partition_condition.as_deref(),
                date_to_db(unit.lease_commencement_date),
                date_to_db(unit.lease_expiry_date),
                decimal_to_db(unit.asking_rent),
                unit.allocated_parking_slot,
                decimal_to_db(unit.price_per_parking_slot),
                unit.minimum_period.as_deref(),
                decimal_to_db(unit.escalation_rate),
                unit.rent_free.as_deref(),
                decimal_to_db(unit.dues),
                decimal_to_db(unit.sale_price),
                unit.sale_parking.as_deref(),
                unit.unit_notes.as_deref(),
                unit.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "unit",
                id: unit.id,
            });
        }

        Ok(())
    }

    fn get_unit(&self, id: RecordId) -> RepoResult<Option<Unit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{UNIT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_unit_row(row)?));
        }

        Ok(None)
    }

    fn list_units(&self, query: &UnitListQuery) -> RepoResult<Vec<Unit>> {
        let mut sql = format!("{UNIT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(building_id) = query.building_id {
            sql.push_str(" AND building_id = ?");
            bind_values.push(Value::Integer(building_id));
        }

        if let Some(status) = query.marketing_status {
            sql.push_str(" AND marketing_status = ?");
            bind_values.push(Value::Text(status.as_db().to_string()));
        }

        if let Some(status) = query.vacancy_status {
            sql.push_str(" AND vacancy_status = ?");
            bind_values.push(Value::Text(status.as_db().to_string()));
        }

        sql.push_str(" ORDER BY building_id ASC, name ASC, id ASC");

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
        let mut units = Vec::new();

        while let Some(row) = rows.next()? {
            units.push(self.parse_unit_row(row)?);
        }

        Ok(units)
    }

    fn delete_unit(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM units WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "unit", id });
        }

        Ok(())
    }
}

impl SqliteUnitRepository<'_> {
    fn parse_unit_row(&self, row: &Row<'_>) -> RepoResult<Unit> {
        let marketing_text: String = row.get("marketing_status")?;
        let marketing_status = MarketingStatus::parse(&marketing_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid marketing status `{marketing_text}` in units.marketing_status"
            ))
        })?;

        let vacancy_text: String = row.get("vacancy_status")?;
        let vacancy_status = VacancyStatus::parse(&vacancy_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid vacancy status `{vacancy_text}` in units.vacancy_status"
            ))
        })?;

        Ok(Unit {
            id: row.get("id")?,
            name: row.get("name")?,
            building_id: row.get("building_id")?,
            floor: read_integer(row, "floor", self.zero)?,
            marketing_status,
            vacancy_status,
            foreclosed: int_to_bool("units", "foreclosed", row.get("foreclosed")?)?,
            contact_information: row.get("contact_information")?,
            gross_floor_area: read_decimal(row, "gross_floor_area", MONEY_SCALE)?,
            net_floor_area: read_decimal(row, "net_floor_area", MONEY_SCALE)?,
            floor_to_ceiling_height: read_decimal(row, "floor_to_ceiling_height", MONEY_SCALE)?,
            ceiling_condition: row.get("ceiling_condition")?,
            floor_condition: row.get("floor_condition")?,
            partition_condition: row.get("partition_condition")?,
            lease_commencement_date: read_date(row, "lease_commencement_date")?,
            lease_expiry_date: read_date(row, "lease_expiry_date")?,
            asking_rent: read_decimal(row, "asking_rent", MONEY_SCALE)?,
            allocated_parking_slot: read_integer(row, "allocated_parking_slot", self.zero)?,
            price_per_parking_slot: read_decimal(row, "price_per_parking_slot", MONEY_SCALE)?,
            minimum_period: row.get("minimum_period")?,
            escalation_rate: read_decimal(row, "escalation_rate", MONEY_SCALE)?,
            rent_free: row.get("rent_free")?,
            dues: read_decimal(row, "dues", MONEY_SCALE)?,
            sale_price: read_decimal(row, "sale_price", MONEY_SCALE)?,
            sale_parking: row.get("sale_parking")?,
            unit_notes: row.get("unit_notes")?,
        })
    }
}
