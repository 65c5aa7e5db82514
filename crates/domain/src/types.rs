// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Half-day slot a rotation assignment applies to.
///
/// Morning and afternoon rotations are scheduled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Morning.
    Am,
    /// Afternoon.
    Pm,
}

impl Period {
    /// Converts this period to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(DomainError::InvalidPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable identifier of a turn.
///
/// Turn ids are produced by the calendar side and used as the
/// foreign key of rotation assignments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(String);

impl TurnId {
    /// Creates a turn id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or longer than 64 characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTurnId(String::from(
                "Turn id cannot be empty",
            )));
        }
        if trimmed.chars().count() > 64 {
            return Err(DomainError::InvalidTurnId(format!(
                "Turn id '{trimmed}' is longer than 64 characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A school holiday, an inclusive date interval.
///
/// Holidays are supplied by the settings store and treated as an
/// immutable read model by the calendar builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Canonical id, `None` until persisted.
    holiday_id: Option<i64>,
    name: String,
    start_date: Date,
    end_date: Date,
}

impl Holiday {
    /// Creates a holiday without a persisted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the interval is reversed.
    pub fn new(name: &str, start_date: Date, end_date: Date) -> Result<Self, DomainError> {
        Self::with_id(None, name, start_date, end_date)
    }

    /// Creates a holiday with an optional persisted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the interval is reversed.
    pub fn with_id(
        holiday_id: Option<i64>,
        name: &str,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidHolidayName(String::from(
                "Holiday name cannot be empty",
            )));
        }
        if start_date > end_date {
            return Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            holiday_id,
            name: name.to_string(),
            start_date,
            end_date,
        })
    }

    /// Returns the canonical id, if persisted.
    #[must_use]
    pub const fn holiday_id(&self) -> Option<i64> {
        self.holiday_id
    }

    /// Returns the holiday name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first day of the holiday.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the last day of the holiday.
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns whether `date` falls within the holiday, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
        time::macros::format_description!("[year]-[month]-[day]");

    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
