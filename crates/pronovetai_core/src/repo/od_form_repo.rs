//! OD form repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the legacy `od_forms` storage.
//! - Coerce legacy text columns into typed optionals on every read.
//!
//! # Invariants
//! - Write paths call `OdForm::validate()` before SQL mutations.
//! - `updated_at` is refreshed by the storage layer on every update.

use crate::coerce::temporal::TemporalPolicy;
use crate::config::CoreConfig;
use crate::model::od_form::{
    CallDirection, CallSource, CallerType, FormStatus, Intent, OdForm, Purpose,
};
use crate::repo::{
    bool_to_int, decimal_to_db, int_to_bool, read_decimal, read_timestamp, timestamp_to_db,
    RecordId, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const OD_FORM_SELECT_SQL: &str = "SELECT
    id,
    date,
    contact_id,
    call_taken_by,
    type_of_call,
    source_of_call,
    type_of_caller,
    intent,
    purpose,
    size_minimum,
    size_maximum,
    budget_minimum,
    budget_maximum,
    prefered_location,
    started_scouting,
    notes,
    account_manager_id,
    status,
    created_at,
    updated_at
FROM od_forms";

const MONEY_SCALE: u32 = 2;

/// Query options for listing OD forms.
#[derive(Debug, Clone, Default)]
pub struct OdFormListQuery {
    pub status: Option<FormStatus>,
    pub account_manager_id: Option<RecordId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for OD form CRUD operations.
pub trait OdFormRepository {
    fn create_form(&self, form: &OdForm) -> RepoResult<RecordId>;
    fn update_form(&self, form: &OdForm) -> RepoResult<()>;
    fn get_form(&self, id: RecordId) -> RepoResult<Option<OdForm>>;
    fn list_forms(&self, query: &OdFormListQuery) -> RepoResult<Vec<OdForm>>;
    fn delete_form(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed OD form repository.
pub struct SqliteOdFormRepository<'conn> {
    conn: &'conn Connection,
    temporal: TemporalPolicy,
}

impl<'conn> SqliteOdFormRepository<'conn> {
    pub fn new(conn: &'conn Connection, config: &CoreConfig) -> Self {
        Self {
            conn,
            temporal: config.temporal_policy(),
        }
    }
}

impl OdFormRepository for SqliteOdFormRepository<'_> {
    fn create_form(&self, form: &OdForm) -> RepoResult<RecordId> {
        form.validate()?;

        self.conn.execute(
            "INSERT INTO od_forms (
                date, contact_id, call_taken_by, type_of_call,
                source_of_call, type_of_caller, intent, purpose,
                size_minimum, size_maximum, budget_minimum, budget_maximum,
                prefered_location, started_scouting, notes,
                account_manager_id, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                      ?13, ?14, ?15, ?16, ?17);",
            params![
                timestamp_to_db(form.date),
                form.contact_id,
                form.call_taken_by.as_deref(),
                form.type_of_call.as_db(),
                form.source_of_call.as_db(),
                form.type_of_caller.as_db(),
                form.intent.as_db(),
                form.purpose.as_db(),
                decimal_to_db(form.size_minimum),
                decimal_to_db(form.size_maximum),
                decimal_to_db(form.budget_minimum),
                decimal_to_db(form.budget_maximum),
                form.preferred_location.as_deref(),
                bool_to_int(form.started_scouting),
                form.notes.as_deref(),
                form.account_manager_id,
                form.status.as_db(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_form(&self, form: &OdForm) -> RepoResult<()> {
        form.validate()?;

        let changed = self.conn.execute(
            "UPDATE od_forms
             SET
                date = ?1,
                contact_id = ?2,
                call_taken_by = ?3,
                type_of_call = ?4,
                source_of_call = ?5,
                type_of_caller = ?6,
                intent = ?7,
                purpose = ?8,
                size_minimum = ?9,
                size_maximum = ?10,
                budget_minimum = ?11,
                budget_maximum = ?12,
                prefered_location = ?13,
                started_scouting = ?14,
                notes = ?15,
                account_manager_id = ?16,
                status = ?17,
                updated_at = strftime('%Y-%m-%d %H:%M:%S', 'now')
             WHERE id = ?18;",
            params![
                timestamp_to_db(form.date),
                form.contact_id,
                form.call_taken_by.as_deref(),
                form.type_of_call.as_db(),
                form.source_of_call.as_db(),
                form.type_of_caller.as_db(),
                form.intent.as_db(),
                form.purpose.as_db(),
                decimal_to_db(form.size_minimum),
                decimal_to_db(form.size_maximum),
                decimal_to_db(form.budget_minimum),
                decimal_to_db(form.budget_maximum),
                form.preferred_location.as_deref(),
                bool_to_int(form.started_scouting),
                form.notes.as_deref(),
                form.account_manager_id,
                form.status.as_db(),
                form.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "od_form",
                id: form.id,
            });
        }

        Ok(())
    }

    fn get_form(&self, id: RecordId) -> RepoResult<Option<OdForm>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OD_FORM_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_form_row(row)?));
        }

        Ok(None)
    }

    fn list_forms(&self, query: &OdFormListQuery) -> RepoResult<Vec<OdForm>> {
        let mut sql = format!("{OD_FORM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_db().to_string()));
        }

        if let Some(account_manager_id) = query.account_manager_id {
            sql.push_str(" AND account_manager_id = ?");
            bind_values.push(Value::Integer(account_manager_id));
        }

        sql.push_str(" ORDER BY date DESC, id DESC");

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
        let mut forms = Vec::new();

        while let Some(row) = rows.next()? {
            forms.push(self.parse_form_row(row)?);
        }

        Ok(forms)
    }

    fn delete_form(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM od_forms WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "od_form",
                id,
            });
        }

        Ok(())
    }
}

impl SqliteOdFormRepository<'_> {
    fn parse_form_row(&self, row: &Row<'_>) -> RepoResult<OdForm> {
        Ok(OdForm {
            id: row.get("id")?,
            date: read_timestamp(row, "date", &self.temporal)?,
            contact_id: row.get("contact_id")?,
            call_taken_by: row.get("call_taken_by")?,
            type_of_call: parse_choice(row, "type_of_call", CallDirection::parse)?,
            source_of_call: parse_choice(row, "source_of_call", CallSource::parse)?,
            type_of_caller: parse_choice(row, "type_of_caller", CallerType::parse)?,
            intent: parse_choice(row, "intent", Intent::parse)?,
            purpose: parse_choice(row, "purpose", Purpose::parse)?,
            size_minimum: read_decimal(row, "size_minimum", MONEY_SCALE)?,
            size_maximum: read_decimal(row, "size_maximum", MONEY_SCALE)?,
            budget_minimum: read_decimal(row, "budget_minimum", MONEY_SCALE)?,
            budget_maximum: read_decimal(row, "budget_maximum", MONEY_SCALE)?,
            preferred_location: row.get("prefered_location")?,
            started_scouting: int_to_bool(
                "od_forms",
                "started_scouting",
                row.get("started_scouting")?,
            )?,
            notes: row.get("notes")?,
            account_manager_id: row.get("account_manager_id")?,
            status: parse_choice(row, "status", FormStatus::parse)?,
            created_at: read_timestamp(row, "created_at", &self.temporal)?,
            updated_at: read_timestamp(row, "updated_at", &self.temporal)?,
        })
    }
}

fn parse_choice<T>(
    row: &Row<'_>,
    column: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> RepoResult<T> {
    let text: String = row.get(column)?;
    parse(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid choice `{text}` in od_forms.{column}"))
    })
}
