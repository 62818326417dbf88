//! Pickup date availability
//!
//! A day can be picked when it is at least `lead_days` after today and is not
//! one of the fixed annual holidays. The calendar holds no other state.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::error::ConfigError;

/// Minimum number of days between ordering and pickup
pub const DEFAULT_LEAD_DAYS: u32 = 7;

/// Fixed holidays as `DD-MM`
pub const DEFAULT_HOLIDAYS: [&str; 11] = [
    "01-01", // New Year
    "01-05", // Labour Day
    "08-05", // Liberation Day
    "05-07", // Cyril & Methodius
    "06-07", // Jan Hus
    "28-09", // St. Wenceslas
    "28-10", // Independence Day
    "17-11", // Struggle for Freedom
    "24-12", // Christmas Eve
    "25-12", // Christmas Day
    "26-12", // St. Stephen's Day
];

/// A recurring holiday, identified by day and month only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Holiday {
    pub day: u32,
    pub month: u32,
}

impl Holiday {
    /// Parse a `DD-MM` entry
    ///
    /// The pair must exist in a leap year, so `29-02` is accepted.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidHoliday {
            value: value.to_string(),
        };

        let (day, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(2024, month, day).ok_or_else(invalid)?;
        Ok(Self { day, month })
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.day() == self.day && date.month() == self.month
    }
}

/// Why a date cannot be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DateRejection {
    /// Inside the lead time window
    TooSoon { earliest: NaiveDate },
    /// One of the fixed holidays
    Holiday,
}

/// Availability rules for pickup dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupCalendar {
    lead_days: u32,
    holidays: BTreeSet<Holiday>,
}

impl Default for PickupCalendar {
    fn default() -> Self {
        let holidays = DEFAULT_HOLIDAYS
            .iter()
            .filter_map(|h| Holiday::parse(h).ok())
            .collect();
        Self {
            lead_days: DEFAULT_LEAD_DAYS,
            holidays,
        }
    }
}

impl PickupCalendar {
    pub fn new(lead_days: u32, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            lead_days,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn lead_days(&self) -> u32 {
        self.lead_days
    }

    pub fn holidays(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.iter()
    }

    /// First day outside the lead time window
    pub fn earliest_allowed(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.lead_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.matches(date))
    }

    /// Check a date, returning the reason it is rejected
    pub fn check(&self, date: NaiveDate, today: NaiveDate) -> Result<(), DateRejection> {
        let earliest = self.earliest_allowed(today);
        if date < earliest {
            return Err(DateRejection::TooSoon { earliest });
        }
        if self.is_holiday(date) {
            return Err(DateRejection::Holiday);
        }
        Ok(())
    }

    /// `date >= today + lead_days` and `(day, month)` is not a holiday
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.check(date, today).is_ok()
    }

    /// The first date a customer can pick
    ///
    /// Holidays are finite and never cover a whole year, so the scan ends
    /// within a few days of the lead time boundary.
    pub fn earliest_selectable(&self, today: NaiveDate) -> NaiveDate {
        let earliest = self.earliest_allowed(today);
        earliest
            .iter_days()
            .take(366)
            .find(|date| !self.is_holiday(*date))
            .unwrap_or(earliest)
    }
}

/// [`PickupCalendar::is_selectable`] with the bakery's default rules
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    PickupCalendar::default().is_selectable(date, today)
}
