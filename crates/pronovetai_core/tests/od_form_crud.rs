use pronovetai_core::db::open_db_in_memory;
use pronovetai_core::{
    CallDirection, CallSource, CallerType, CoreConfig, FormStatus, Intent, OdForm,
    OdFormListQuery, OdFormRepository, Purpose, RepoError, SqliteOdFormRepository,
    ValidationError,
};
use chrono::{FixedOffset, TimeZone, Timelike};
use rust_decimal::Decimal;

fn sample_form() -> OdForm {
    OdForm::new(
        CallDirection::Inbound,
        CallSource::Referral,
        CallerType::Direct,
        Intent::Rent,
        Purpose::Relocating,
    )
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteOdFormRepository::new(&conn, &config);

    let manila = FixedOffset::east_opt(8 * 3600).unwrap();
    let mut form = sample_form();
    form.date = Some(manila.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap());
    form.size_minimum = Some(Decimal::from(120));
    form.size_maximum = Some(Decimal::from(300));
    form.preferred_location = Some("Makati CBD".to_string());

    let id = repo.create_form(&form).unwrap();
    let loaded = repo.get_form(id).unwrap().unwrap();

    assert_eq!(loaded.type_of_call, CallDirection::Inbound);
    assert_eq!(loaded.status, FormStatus::Active);
    assert_eq!(loaded.date, form.date);
    assert_eq!(loaded.size_minimum, Some(Decimal::from(120)));
    assert_eq!(loaded.preferred_location.as_deref(), Some("Makati CBD"));
    // Storage-side default timestamps localize into the config zone.
    assert!(loaded.created_at.is_some());
    assert!(loaded.updated_at.is_some());
    assert_eq!(
        loaded.created_at.unwrap().offset().local_minus_utc(),
        8 * 3600
    );
}

#[test]
fn legacy_text_row_is_coerced_on_read() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO od_forms (
            date, type_of_call, source_of_call, type_of_caller, intent,
            purpose, size_minimum, budget_minimum, budget_maximum, status
        ) VALUES ('2021-02-10 09:15:00', 'inbound', 'newspaper', 'broker',
                  'buy', 'expanding', '', '45,000.00php', '0', 'active');",
        [],
    )
    .unwrap();

    let config = CoreConfig::default();
    let repo = SqliteOdFormRepository::new(&conn, &config);
    let forms = repo.list_forms(&OdFormListQuery::default()).unwrap();
    assert_eq!(forms.len(), 1);

    let form = &forms[0];
    assert_eq!(form.source_of_call, CallSource::Newspaper);
    assert_eq!(form.type_of_caller, CallerType::Broker);
    assert_eq!(form.intent, Intent::Buy);
    assert_eq!(form.size_minimum, None);
    assert_eq!(form.budget_minimum, Some(Decimal::from(45000)));
    // Decimal "0" is a legitimate zero on budget columns.
    assert_eq!(form.budget_maximum, Some(Decimal::from(0)));

    let date = form.date.unwrap();
    assert_eq!(date.hour(), 9);
    assert_eq!(date.offset().local_minus_utc(), 8 * 3600);
}

#[test]
fn inverted_budget_range_rejects_the_write() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteOdFormRepository::new(&conn, &config);

    let mut form = sample_form();
    form.budget_minimum = Some(Decimal::from(90000));
    form.budget_maximum = Some(Decimal::from(45000));

    assert!(matches!(
        repo.create_form(&form).unwrap_err(),
        RepoError::Validation(ValidationError::RangeOrder {
            minimum_field: "budget_minimum",
            maximum_field: "budget_maximum",
        })
    ));
}

#[test]
fn list_filters_by_status_and_account_manager() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteOdFormRepository::new(&conn, &config);

    let mut first = sample_form();
    first.account_manager_id = Some(7);
    repo.create_form(&first).unwrap();

    let mut second = sample_form();
    second.status = FormStatus::DoneDeal;
    second.account_manager_id = Some(7);
    repo.create_form(&second).unwrap();

    let mut third = sample_form();
    third.account_manager_id = Some(9);
    repo.create_form(&third).unwrap();

    let query = OdFormListQuery {
        status: Some(FormStatus::Active),
        account_manager_id: Some(7),
        ..OdFormListQuery::default()
    };
    let forms = repo.list_forms(&query).unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].account_manager_id, Some(7));
    assert_eq!(forms[0].status, FormStatus::Active);
}

#[test]
fn update_changes_status() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteOdFormRepository::new(&conn, &config);

    let mut form = sample_form();
    let id = repo.create_form(&form).unwrap();
    form.id = id;
    form.status = FormStatus::Inactive;
    repo.update_form(&form).unwrap();

    let loaded = repo.get_form(id).unwrap().unwrap();
    assert_eq!(loaded.status, FormStatus::Inactive);
    assert!(loaded.updated_at.is_some());

    repo.delete_form(id).unwrap();
    assert!(repo.get_form(id).unwrap().is_none());
}
