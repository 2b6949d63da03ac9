//! OD form use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for inquiry forms.
//! - Turn raw API payloads into validated `OdForm` records.

use crate::coerce::numeric::coerce_decimal_text;
use crate::coerce::temporal::coerce_timestamp_text;
use crate::config::CoreConfig;
use crate::model::od_form::{
    CallDirection, CallSource, CallerType, FormStatus, Intent, OdForm, Purpose,
};
use crate::model::ValidationError;
use crate::repo::od_form_repo::{OdFormListQuery, OdFormRepository};
use crate::repo::{RecordId, RepoResult};
use crate::service::{parse_choice, required_choice};
use serde::Deserialize;

const MONEY_SCALE: u32 = 2;

/// Raw candidate values decoded from an API request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OdFormPayload {
    pub date: Option<String>,
    pub contact_id: Option<RecordId>,
    pub call_taken_by: Option<String>,
    pub type_of_call: Option<String>,
    pub source_of_call: Option<String>,
    pub type_of_caller: Option<String>,
    pub intent: Option<String>,
    pub purpose: Option<String>,
    pub size_minimum: Option<String>,
    pub size_maximum: Option<String>,
    pub budget_minimum: Option<String>,
    pub budget_maximum: Option<String>,
    pub preferred_location: Option<String>,
    pub started_scouting: Option<bool>,
    pub notes: Option<String>,
    pub account_manager_id: Option<RecordId>,
    pub status: Option<String>,
}

/// Normalizes a payload into a typed `OdForm` and checks its invariants.
///
/// The call classification choices are required; size/budget text is
/// tolerantly coerced; both range pairs are validated before the record
/// is returned.
pub fn normalize_and_validate(
    payload: &OdFormPayload,
    config: &CoreConfig,
) -> Result<OdForm, ValidationError> {
    let type_of_call = required_choice(
        payload.type_of_call.as_deref(),
        "type_of_call",
        CallDirection::parse,
    )?;
    let source_of_call = required_choice(
        payload.source_of_call.as_deref(),
        "source_of_call",
        CallSource::parse,
    )?;
    let type_of_caller = required_choice(
        payload.type_of_caller.as_deref(),
        "type_of_caller",
        CallerType::parse,
    )?;
    let intent = required_choice(payload.intent.as_deref(), "intent", Intent::parse)?;
    let purpose = required_choice(payload.purpose.as_deref(), "purpose", Purpose::parse)?;

    let mut form = OdForm::new(type_of_call, source_of_call, type_of_caller, intent, purpose);

    if let Some(status) = parse_choice(payload.status.as_deref(), "status", FormStatus::parse)? {
        form.status = status;
    }

    let policy = config.temporal_policy();
    form.date = payload
        .date
        .as_deref()
        .and_then(|text| coerce_timestamp_text(text, &policy));
    form.contact_id = payload.contact_id;
    form.call_taken_by = payload.call_taken_by.clone();
    form.size_minimum = coerce_money(payload.size_minimum.as_deref());
    form.size_maximum = coerce_money(payload.size_maximum.as_deref());
    form.budget_minimum = coerce_money(payload.budget_minimum.as_deref());
    form.budget_maximum = coerce_money(payload.budget_maximum.as_deref());
    form.preferred_location = payload.preferred_location.clone();
    form.started_scouting = payload.started_scouting.unwrap_or(false);
    form.notes = payload.notes.clone();
    form.account_manager_id = payload.account_manager_id;

    form.validate()?;
    Ok(form)
}

fn coerce_money(text: Option<&str>) -> Option<rust_decimal::Decimal> {
    text.and_then(|value| coerce_decimal_text(value, MONEY_SCALE))
}

/// Use-case service wrapper for OD form CRUD operations.
pub struct OdFormService<R: OdFormRepository> {
    repo: R,
    config: CoreConfig,
}

impl<R: OdFormRepository> OdFormService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R, config: CoreConfig) -> Self {
        Self { repo, config }
    }

    /// Normalizes and persists a new form from an API payload.
    pub fn create_from_payload(&self, payload: &OdFormPayload) -> RepoResult<RecordId> {
        let form = normalize_and_validate(payload, &self.config)?;
        self.repo.create_form(&form)
    }

    /// Normalizes an API payload and updates the form with the given ID.
    pub fn update_from_payload(&self, id: RecordId, payload: &OdFormPayload) -> RepoResult<()> {
        let mut form = normalize_and_validate(payload, &self.config)?;
        form.id = id;
        self.repo.update_form(&form)
    }

    pub fn create_form(&self, form: &OdForm) -> RepoResult<RecordId> {
        self.repo.create_form(form)
    }

    pub fn update_form(&self, form: &OdForm) -> RepoResult<()> {
        self.repo.update_form(form)
    }

    pub fn get_form(&self, id: RecordId) -> RepoResult<Option<OdForm>> {
        self.repo.get_form(id)
    }

    pub fn list_forms(&self, query: &OdFormListQuery) -> RepoResult<Vec<OdForm>> {
        self.repo.list_forms(query)
    }

    pub fn delete_form(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_form(id)
    }
}
