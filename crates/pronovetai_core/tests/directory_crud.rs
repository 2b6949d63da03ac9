use pronovetai_core::db::open_db_in_memory;
use pronovetai_core::{
    Address, Company, Contact, ContactRepository, RepoError, SqliteContactRepository,
    ValidationError,
};

#[test]
fn address_roundtrip_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let mut address = Address::new("Makati");
    address.street_address = Some("6750 Ayala Avenue".to_string());
    address.barangay = Some("San Lorenzo".to_string());

    let id = repo.create_address(&address).unwrap();
    let loaded = repo.get_address(id).unwrap().unwrap();
    assert_eq!(loaded.city, "Makati");
    assert_eq!(loaded.street_address.as_deref(), Some("6750 Ayala Avenue"));

    repo.delete_address(id).unwrap();
    assert!(repo.get_address(id).unwrap().is_none());
    assert!(matches!(
        repo.delete_address(id).unwrap_err(),
        RepoError::NotFound {
            entity: "address",
            ..
        }
    ));
}

#[test]
fn contact_email_is_validated_on_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let err = repo.create_contact(&Contact::new("not-an-email")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidEmail { .. })
    ));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn contacts_list_by_company() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let company_id = repo.create_company(&Company::new("Pronove Tai")).unwrap();
    let other_id = repo.create_company(&Company::new("Acme Leasing")).unwrap();

    let mut first = Contact::new("reyes@example.com");
    first.company_id = Some(company_id);
    first.last_name = Some("Reyes".to_string());
    repo.create_contact(&first).unwrap();

    let mut second = Contact::new("cruz@example.com");
    second.company_id = Some(company_id);
    second.last_name = Some("Cruz".to_string());
    repo.create_contact(&second).unwrap();

    let mut elsewhere = Contact::new("tan@example.com");
    elsewhere.company_id = Some(other_id);
    repo.create_contact(&elsewhere).unwrap();

    let listed = repo.list_contacts_by_company(company_id).unwrap();
    assert_eq!(listed.len(), 2);
    // Ordered by last name.
    assert_eq!(listed[0].last_name.as_deref(), Some("Cruz"));
    assert_eq!(listed[1].last_name.as_deref(), Some("Reyes"));
}

#[test]
fn contact_update_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let mut contact = Contact::new("santos@example.com");
    let id = repo.create_contact(&contact).unwrap();
    contact.id = id;
    contact.first_name = Some("Ana".to_string());
    contact.position = Some("Leasing Manager".to_string());
    repo.update_contact(&contact).unwrap();

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded.first_name.as_deref(), Some("Ana"));
    assert_eq!(loaded.display_name(), "Ana");

    repo.delete_contact(id).unwrap();
    assert!(repo.get_contact(id).unwrap().is_none());
}

#[test]
fn company_update_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let mut company = Company::new("KMC Savills");
    let id = repo.create_company(&company).unwrap();
    company.id = id;
    company.industry = Some("Real estate".to_string());
    repo.update_company(&company).unwrap();

    let loaded = repo.get_company(id).unwrap().unwrap();
    assert_eq!(loaded.industry.as_deref(), Some("Real estate"));

    repo.delete_company(id).unwrap();
    assert!(matches!(
        repo.update_company(&company).unwrap_err(),
        RepoError::NotFound {
            entity: "company",
            ..
        }
    ));
}

#[test]
fn deleting_company_detaches_contacts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let company_id = repo.create_company(&Company::new("Short Lived Inc")).unwrap();
    let mut contact = Contact::new("lopez@example.com");
    contact.company_id = Some(company_id);
    let contact_id = repo.create_contact(&contact).unwrap();

    repo.delete_company(company_id).unwrap();

    // ON DELETE SET NULL: the person survives without an employer.
    let loaded = repo.get_contact(contact_id).unwrap().unwrap();
    assert_eq!(loaded.company_id, None);
}
