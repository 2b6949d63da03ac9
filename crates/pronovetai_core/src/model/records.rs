//! Plain directory records: addresses, contacts, companies.
//!
//! These entities carry no coercion logic beyond their field shapes; the
//! only validation is the contact email shape check.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Postal address referenced by buildings and companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub street_address: Option<String>,
    pub barangay: Option<String>,
    pub city: String,
}

impl Address {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            id: 0,
            street_address: None,
            barangay: None,
            city: city.into(),
        }
    }
}

/// Person record attached to companies, buildings and inquiry forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub company_id: Option<i64>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub mobile_number: Option<String>,
    pub fax_number: Option<String>,
    pub notes: Option<String>,
}

impl Contact {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: 0,
            company_id: None,
            title: None,
            first_name: None,
            last_name: None,
            email: email.into(),
            position: None,
            phone_number: None,
            mobile_number: None,
            fax_number: None,
            notes: None,
        }
    }

    /// Display name: full name when available, email otherwise.
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.email.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Checks the email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail {
                value: self.email.clone(),
            });
        }
        Ok(())
    }
}

/// Company occupying or affiliated with buildings and units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub building_id: Option<i64>,
    pub address_id: Option<i64>,
    pub industry: Option<String>,
    pub contact: Option<String>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            building_id: None,
            address_id: None,
            industry: None,
            contact: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Contact;
    use crate::model::ValidationError;

    #[test]
    fn plain_email_passes() {
        assert!(Contact::new("broker@example.com").validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["not-an-email", "a@b", "two@@example.com", "has space@x.ph"] {
            let err = Contact::new(bad).validate().unwrap_err();
            assert!(matches!(err, ValidationError::InvalidEmail { .. }));
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut contact = Contact::new("jun@example.ph");
        assert_eq!(contact.display_name(), "jun@example.ph");
        contact.first_name = Some("Jun".to_string());
        assert_eq!(contact.display_name(), "Jun");
        contact.last_name = Some("Reyes".to_string());
        assert_eq!(contact.display_name(), "Jun Reyes");
    }
}
