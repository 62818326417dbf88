//! Configuration loading and management
//!
//! The bakery's catalog (pickup locations, holidays, limits and message
//! templates) is data, not code. [`FormConfig::default_config`] reproduces
//! the shipped catalog; a YAML file can replace any part of it.

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::core::calendar::{DEFAULT_HOLIDAYS, DEFAULT_LEAD_DAYS, Holiday, PickupCalendar};
use crate::core::error::ConfigError;

/// Kind of pickup point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Store,
    Factory,
}

/// A pickup point, keyed by its id in [`FormConfig::locations`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub category: LocationCategory,
}

/// Allowed number of identical cakes per order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl QuantityLimits {
    pub fn clamp(&self, quantity: u32) -> u32 {
        quantity.clamp(self.min, self.max)
    }
}

fn default_lead_days() -> u32 {
    DEFAULT_LEAD_DAYS
}

fn default_holidays() -> Vec<String> {
    DEFAULT_HOLIDAYS.iter().map(|h| h.to_string()).collect()
}

fn default_max_images() -> usize {
    5
}

fn default_analysis_timeout_ms() -> u64 {
    15_000
}

/// Complete configuration of the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Address the composed order is sent to
    pub recipient: String,

    /// Pickup points, in the order they are offered; the first is the default
    pub locations: IndexMap<String, Location>,

    /// Minimum days between ordering and pickup
    #[serde(default = "default_lead_days")]
    pub lead_days: u32,

    /// Fixed annual holidays as `DD-MM`
    #[serde(default = "default_holidays")]
    pub holidays: Vec<String>,

    /// Maximum number of reference photos
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    #[serde(default)]
    pub quantity: QuantityLimits,

    /// Upper bound for one image analysis
    #[serde(default = "default_analysis_timeout_ms")]
    pub analysis_timeout_ms: u64,

    /// Tera template overriding the message subject
    #[serde(default)]
    pub subject_template: Option<String>,

    /// Tera template overriding the message body
    #[serde(default)]
    pub body_template: Option<String>,
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for inconsistencies
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locations.is_empty() {
            return Err(ConfigError::NoLocations);
        }
        if !self.recipient.validate_email() {
            return Err(ConfigError::InvalidValue {
                field: "recipient".to_string(),
                message: format!("'{}' is not an e-mail address", self.recipient),
            });
        }
        if self.max_images == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_images".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.quantity.min == 0 || self.quantity.min > self.quantity.max {
            return Err(ConfigError::InvalidValue {
                field: "quantity".to_string(),
                message: format!(
                    "expected 1 <= min <= max, got {}..={}",
                    self.quantity.min, self.quantity.max
                ),
            });
        }
        self.calendar()?;
        Ok(())
    }

    /// Build the pickup calendar from `lead_days` and `holidays`
    pub fn calendar(&self) -> Result<PickupCalendar, ConfigError> {
        let holidays = self
            .holidays
            .iter()
            .map(|h| Holiday::parse(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PickupCalendar::new(self.lead_days, holidays))
    }

    /// Find a pickup location by id
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Id of the location preselected for new orders
    pub fn default_location_id(&self) -> Option<&str> {
        self.locations.keys().next().map(String::as_str)
    }

    /// The bakery's shipped catalog
    pub fn default_config() -> Self {
        let mut locations = IndexMap::new();
        locations.insert(
            "petrvald".to_string(),
            Location {
                name: "Petřvald".to_string(),
                address: "Šenovská 1".to_string(),
                phone: "778 157 857".to_string(),
                category: LocationCategory::Store,
            },
        );
        locations.insert(
            "karvina".to_string(),
            Location {
                name: "Karviná".to_string(),
                address: "Tř. Těreškovové 2233/28".to_string(),
                phone: "778 157 867".to_string(),
                category: LocationCategory::Store,
            },
        );
        locations.insert(
            "ostrava".to_string(),
            Location {
                name: "Ostrava Zábřeh".to_string(),
                address: "Výškovická 116A".to_string(),
                phone: "775 271 101".to_string(),
                category: LocationCategory::Store,
            },
        );
        locations.insert(
            "pist".to_string(),
            Location {
                name: "Píšť (Výrobna)".to_string(),
                address: "Opavská 218/101".to_string(),
                phone: "602 323 788".to_string(),
                category: LocationCategory::Factory,
            },
        );

        Self {
            recipient: "cukrarna.pist@seznam.cz".to_string(),
            locations,
            lead_days: default_lead_days(),
            holidays: default_holidays(),
            max_images: default_max_images(),
            quantity: QuantityLimits::default(),
            analysis_timeout_ms: default_analysis_timeout_ms(),
            subject_template: None,
            body_template: None,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
