//! Typed error handling for the order form
//!
//! Nothing in the core is fatal: every error either blocks a step with a
//! correctable prompt or reports a configuration problem at load time.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a required field is missing or an edit is not allowed
//! - [`ContactError`]: contact details are missing or malformed at submission
//! - [`ConfigError`]: the catalog configuration is inconsistent
//! - [`NotificationError`]: the outbound message could not be rendered
//! - `Storage`: a preview handle could not be created or released
//!
//! # Example
//!
//! ```rust,ignore
//! match session.next_step() {
//!     Ok(step) => println!("Now on {}", step),
//!     Err(OrderError::Validation(e)) => show_prompt(&e.user_message()),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::core::calendar::DateRejection;
use crate::core::contact::ContactField;
use crate::core::shape::{Shape, SizeToken};
use crate::core::surface::{SurfaceField, SurfaceFinish};

/// The main error type for the order form
#[derive(Debug, Error)]
pub enum OrderError {
    /// A step cannot be left or an edit was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Contact details block submission
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rendering the outbound message failed
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// A preview handle could not be created or released
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Error prompt shown to the customer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorPrompt {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable message in the form's locale
    pub message: String,
}

impl OrderError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::Validation(e) => e.error_code(),
            OrderError::Contact(e) => e.error_code(),
            OrderError::Config(_) => "CONFIG_ERROR",
            OrderError::Notification(_) => "NOTIFICATION_ERROR",
            OrderError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Message suitable for a blocking prompt
    pub fn user_message(&self) -> String {
        match self {
            OrderError::Validation(e) => e.user_message(),
            OrderError::Contact(e) => e.user_message(),
            OrderError::Config(_) | OrderError::Notification(_) => {
                "Objednávku se nepodařilo zpracovat. Zkuste to prosím znovu.".to_string()
            }
            OrderError::Storage(_) => {
                "Nepodařilo se nahrát obrázek. Zkuste to prosím znovu.".to_string()
            }
        }
    }

    /// Convert to a prompt
    pub fn to_prompt(&self) -> ErrorPrompt {
        ErrorPrompt {
            code: self.error_code().to_string(),
            message: self.user_message(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A required field is missing or an edit is not allowed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The chosen surface finish still lacks a required attribute
    #[error("surface '{surface}' is missing {field:?}")]
    MissingSurfaceField {
        surface: SurfaceFinish,
        field: SurfaceField,
    },

    /// No pickup date has been chosen
    #[error("pickup date is not selected")]
    MissingPickupDate,

    /// The date is inside the lead time or a holiday
    #[error("pickup date {date} is not available: {reason:?}")]
    DateNotSelectable {
        date: NaiveDate,
        reason: DateRejection,
    },

    /// Tier index does not exist in the current tier set
    #[error("tier index {index} out of range (tiers: {tiers})")]
    TierIndexOutOfRange { index: usize, tiers: usize },

    /// Tier count outside 1..=3
    #[error("invalid tier count {count}")]
    InvalidTierCount { count: u8 },

    /// The size is not part of the shape's vocabulary
    #[error("size '{size}' is not offered for shape {shape:?}")]
    SizeNotOffered { shape: Shape, size: SizeToken },

    /// Pickup location id is not in the catalog
    #[error("unknown pickup location '{id}'")]
    UnknownLocation { id: String },

    /// A label could not be mapped to a catalog option
    #[error("unknown {field} option '{value}'")]
    UnknownOption { field: String, value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingSurfaceField { .. } => "SURFACE_INCOMPLETE",
            ValidationError::MissingPickupDate => "PICKUP_DATE_MISSING",
            ValidationError::DateNotSelectable { .. } => "PICKUP_DATE_UNAVAILABLE",
            ValidationError::TierIndexOutOfRange { .. } => "TIER_INDEX_OUT_OF_RANGE",
            ValidationError::InvalidTierCount { .. } => "INVALID_TIER_COUNT",
            ValidationError::SizeNotOffered { .. } => "SIZE_NOT_OFFERED",
            ValidationError::UnknownLocation { .. } => "UNKNOWN_LOCATION",
            ValidationError::UnknownOption { .. } => "UNKNOWN_OPTION",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingSurfaceField { field, .. } => field.prompt().to_string(),
            ValidationError::MissingPickupDate => "Vyberte prosím datum vyzvednutí.".to_string(),
            ValidationError::DateNotSelectable { reason, .. } => match reason {
                DateRejection::TooSoon { earliest } => format!(
                    "Nejdřívější datum vyzvednutí je {}.",
                    earliest.format("%-d. %-m. %Y")
                ),
                DateRejection::Holiday => "Ve svátek dorty nevydáváme.".to_string(),
            },
            ValidationError::TierIndexOutOfRange { .. }
            | ValidationError::InvalidTierCount { .. } => "Neplatný počet pater.".to_string(),
            ValidationError::SizeNotOffered { size, .. } => {
                format!("Velikost {} není pro tento tvar k dispozici.", size)
            }
            ValidationError::UnknownLocation { .. } => {
                "Vyberte prosím místo vyzvednutí.".to_string()
            }
            ValidationError::UnknownOption { value, .. } => {
                format!("Neznámá volba: {}", value)
            }
        }
    }
}

// =============================================================================
// Contact Errors
// =============================================================================

/// Contact details block submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// One or more contact fields are empty
    #[error("missing contact fields: {fields:?}")]
    Missing { fields: Vec<ContactField> },

    /// E-mail address is not well-formed
    #[error("invalid e-mail address '{value}'")]
    InvalidEmail { value: String },

    /// Phone number is not well-formed
    #[error("invalid phone number '{value}'")]
    InvalidPhone { value: String },
}

impl ContactError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ContactError::Missing { .. } => "CONTACT_MISSING",
            ContactError::InvalidEmail { .. } => "CONTACT_INVALID_EMAIL",
            ContactError::InvalidPhone { .. } => "CONTACT_INVALID_PHONE",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ContactError::Missing { fields } => {
                let names: Vec<&str> = fields.iter().map(ContactField::label).collect();
                format!(
                    "Vyplňte prosím všechny kontaktní údaje ({}), abychom vás mohli kontaktovat.",
                    names.join(", ")
                )
            }
            ContactError::InvalidEmail { .. } => "Zadejte prosím platný email.".to_string(),
            ContactError::InvalidPhone { .. } => "Zadejte prosím platné telefonní číslo.".to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Holiday entry is not a valid `DD-MM` day
    #[error("invalid holiday '{value}', expected DD-MM")]
    InvalidHoliday { value: String },

    /// The location table is empty
    #[error("at least one pickup location is required")]
    NoLocations,

    /// Invalid value in configuration
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Notification Errors
// =============================================================================

/// Errors raised while composing the outbound message
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The template could not be parsed or rendered
    #[error("failed to render {template} template: {message}")]
    Render { template: String, message: String },
}
