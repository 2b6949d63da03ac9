//! Directory repository: addresses, contacts, companies.
//!
//! # Responsibility
//! - Plain structured-record CRUD for the directory aggregate.
//!
//! # Invariants
//! - Contact writes call `Contact::validate()` (email shape) first.
//! - Directory rows hard-delete; only users soft-delete.

use crate::model::records::{Address, Company, Contact};
use crate::repo::{RecordId, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    company_id,
    title,
    first_name,
    last_name,
    email,
    position,
    phone_number,
    mobile_number,
    fax_number,
    notes
FROM contacts";

/// Repository interface for directory CRUD operations.
pub trait ContactRepository {
    fn create_address(&self, address: &Address) -> RepoResult<RecordId>;
    fn get_address(&self, id: RecordId) -> RepoResult<Option<Address>>;
    fn delete_address(&self, id: RecordId) -> RepoResult<()>;

    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId>;
    fn update_contact(&self, contact: &Contact) -> RepoResult<()>;
    fn get_contact(&self, id: RecordId) -> RepoResult<Option<Contact>>;
    fn list_contacts_by_company(&self, company_id: RecordId) -> RepoResult<Vec<Contact>>;
    fn delete_contact(&self, id: RecordId) -> RepoResult<()>;

    fn create_company(&self, company: &Company) -> RepoResult<RecordId>;
    fn update_company(&self, company: &Company) -> RepoResult<()>;
    fn get_company(&self, id: RecordId) -> RepoResult<Option<Company>>;
    fn delete_company(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed directory repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_address(&self, address: &Address) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO addresses (street_address, barangay, city)
             VALUES (?1, ?2, ?3);",
            params![
                address.street_address.as_deref(),
                address.barangay.as_deref(),
                address.city.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_address(&self, id: RecordId) -> RepoResult<Option<Address>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, street_address, barangay, city FROM addresses WHERE id = ?1;",
        )?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Address {
                id: row.get("id")?,
                street_address: row.get("street_address")?,
                barangay: row.get("barangay")?,
                city: row.get("city")?,
            }));
        }

        Ok(None)
    }

    fn delete_address(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM addresses WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "address",
                id,
            });
        }

        Ok(())
    }

    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                company_id, title, first_name, last_name, email, position,
                phone_number, mobile_number, fax_number, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                contact.company_id,
                contact.title.as_deref(),
                contact.first_name.as_deref(),
                contact.last_name.as_deref(),
                contact.email.as_str(),
                contact.position.as_deref(),
                contact.phone_number.as_deref(),
                contact.mobile_number.as_deref(),
                contact.fax_number.as_deref(),
                contact.notes.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                company_id = ?1,
                title = ?2,
                first_name = ?3,
                last_name = ?4,
                email = ?5,
                position = ?6,
                phone_number = ?7,
                mobile_number = ?8,
                fax_number = ?9,
                notes = ?10
             WHERE id = ?11;",
            params![
                contact.company_id,
                contact.title.as_deref(),
                contact.first_name.as_deref(),
                contact.last_name.as_deref(),
                contact.email.as_str(),
                contact.position.as_deref(),
                contact.phone_number.as_deref(),
                contact.mobile_number.as_deref(),
                contact.fax_number.as_deref(),
                contact.notes.as_deref(),
                contact.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "contact",
                id: contact.id,
            });
        }

        Ok(())
    }

    fn get_contact(&self, id: RecordId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn list_contacts_by_company(&self, company_id: RecordId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} WHERE company_id = ?1 ORDER BY last_name ASC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![company_id])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn delete_contact(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "contact",
                id,
            });
        }

        Ok(())
    }

    fn create_company(&self, company: &Company) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO companies (name, building_id, address_id, industry, contact)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                company.name.as_str(),
                company.building_id,
                company.address_id,
                company.industry.as_deref(),
                company.contact.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_company(&self, company: &Company) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE companies
             SET name = ?1, building_id = ?2, address_id = ?3, industry = ?4, contact = ?5
             WHERE id = ?6;",
            params![
                company.name.as_str(),
                company.building_id,
                company.address_id,
                company.industry.as_deref(),
                company.contact.as_deref(),
                company.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id: company.id,
            });
        }

        Ok(())
    }

    fn get_company(&self, id: RecordId) -> RepoResult<Option<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, building_id, address_id, industry, contact
             FROM companies WHERE id = ?1;",
        )?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Company {
                id: row.get("id")?,
                name: row.get("name")?,
                building_id: row.get("building_id")?,
                address_id: row.get("address_id")?,
                industry: row.get("industry")?,
                contact: row.get("contact")?,
            }));
        }

        Ok(None)
    }

    fn delete_company(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id,
            });
        }

        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        company_id: row.get("company_id")?,
        title: row.get("title")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        position: row.get("position")?,
        phone_number: row.get("phone_number")?,
        mobile_number: row.get("mobile_number")?,
        fax_number: row.get("fax_number")?,
        notes: row.get("notes")?,
    })
}
