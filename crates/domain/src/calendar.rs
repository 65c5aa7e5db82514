// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly calendar generation.
//!
//! This module derives the sequence of weeks a rotation runs over:
//! every occurrence of one weekday between two dates, each annotated
//! with its ISO 8601 week number and a holiday flag.
//!
//! ## Invariants
//!
//! - Every emitted date falls on the requested weekday
//! - Dates are strictly increasing in steps of exactly 7 days
//! - The first date is the earliest occurrence on or after the start date
//! - Holidays flag weeks, they never remove them
//! - Output depends only on the inputs (no clock, no cache)

use crate::error::DomainError;
use crate::types::Holiday;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

/// A single occurrence of the scheduled weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// The calendar date of the occurrence.
    pub date: Date,
    /// ISO 8601 week number of `date`.
    pub iso_week: u8,
    /// Human readable label, e.g. `KW 37, 09.09.2024`.
    pub label: String,
    /// Whether any holiday covers `date`.
    pub is_holiday: bool,
}

impl Week {
    fn new(date: Date, holidays: &[Holiday]) -> Self {
        let iso_week: u8 = date.iso_week();
        Self {
            date,
            iso_week,
            label: week_label(date, iso_week),
            is_holiday: holidays.iter().any(|holiday| holiday.contains(date)),
        }
    }
}

fn week_label(date: Date, iso_week: u8) -> String {
    format!(
        "KW {iso_week}, {:02}.{:02}.{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Converts a weekday index to a `Weekday`.
///
/// Index 0 is Sunday, 6 is Saturday.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` if the index is greater than 6.
pub const fn weekday_from_index(index: u8) -> Result<Weekday, DomainError> {
    if index > 6 {
        return Err(DomainError::InvalidWeekday(index));
    }
    Ok(Weekday::Sunday.nth_next(index))
}

/// Number of days from `from` forward to the next `to` (0 if equal).
const fn days_until(from: Weekday, to: Weekday) -> u8 {
    (to.number_days_from_sunday() + 7 - from.number_days_from_sunday()) % 7
}

/// Generates every occurrence of `weekday` between two dates.
///
/// # Arguments
///
/// * `start_date` - First day of the range (inclusive)
/// * `end_date` - Last day of the range (inclusive)
/// * `weekday` - Weekday index, 0 = Sunday through 6 = Saturday
/// * `holidays` - Holidays used to flag weeks
///
/// # Returns
///
/// The ordered week sequence. A range without any occurrence of the
/// weekday yields an empty vector.
///
/// # Errors
///
/// Returns an error if:
/// - `start_date` is after `end_date`
/// - `weekday` is outside `0..=6`
pub fn generate_weeks(
    start_date: Date,
    end_date: Date,
    weekday: u8,
    holidays: &[Holiday],
) -> Result<Vec<Week>, DomainError> {
    if start_date > end_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    let weekday: Weekday = weekday_from_index(weekday)?;

    // Stepping past `Date::MAX` also steps past `end_date`.
    let mut weeks: Vec<Week> = Vec::new();
    let offset: i64 = i64::from(days_until(start_date.weekday(), weekday));
    let Some(mut cursor) = start_date.checked_add(Duration::days(offset)) else {
        return Ok(weeks);
    };

    while cursor <= end_date {
        weeks.push(Week::new(cursor, holidays));
        match cursor.checked_add(Duration::WEEK) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    Ok(weeks)
}
