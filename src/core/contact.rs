//! Customer contact details and their submission check

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use validator::Validate;

use crate::core::error::ContactError;

/// A contact field required at submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Phone,
    Email,
}

impl ContactField {
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Jméno",
            ContactField::Phone => "Telefon",
            ContactField::Email => "Email",
        }
    }
}

/// Who to call when the cake is ready
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[validate(email)]
    pub email: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Fields left empty, in form order
    pub fn missing_fields(&self) -> Vec<ContactField> {
        [
            (ContactField::Name, &self.name),
            (ContactField::Phone, &self.phone),
            (ContactField::Email, &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check presence of every field, then the e-mail and phone formats
    pub fn check(&self) -> Result<(), ContactError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ContactError::Missing { fields: missing });
        }

        let trimmed = Self::new(self.name.trim(), self.phone.trim(), self.email.trim());
        if trimmed.validate().is_err() {
            return Err(ContactError::InvalidEmail {
                value: self.email.clone(),
            });
        }

        if !is_valid_phone(&self.phone) {
            return Err(ContactError::InvalidPhone {
                value: self.phone.clone(),
            });
        }

        Ok(())
    }
}

fn is_valid_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        // 9 to 15 digits, optional leading +, digit groups separated by spaces
        Regex::new(r"^\+?\d(?: ?\d){8,14}$").ok()
    });
    regex
        .as_ref()
        .is_some_and(|regex| regex.is_match(phone.trim()))
}
