// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Period;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The calendar range ends before it starts.
    InvalidDateRange {
        /// The first day of the range.
        start_date: time::Date,
        /// The last day of the range.
        end_date: time::Date,
    },
    /// Weekday index outside `0..=6` (0 = Sunday).
    InvalidWeekday(u8),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Holiday name is empty or invalid.
    InvalidHolidayName(String),
    /// Turn grouping was requested with zero weeks per turn.
    InvalidWeeksPerTurn,
    /// Turn identifier is empty or invalid.
    InvalidTurnId(String),
    /// The same turn identifier appears more than once in a rotation request.
    DuplicateTurnId(String),
    /// Period string is not `AM` or `PM`.
    InvalidPeriod(String),
    /// A group rotation does not carry one entry per turn.
    MisalignedRotation {
        /// The period of the offending entry.
        period: Period,
        /// The group whose entry is misaligned.
        group_id: i32,
        /// The number of turns in the request.
        expected: usize,
        /// The number of entries supplied for the group.
        actual: usize,
    },
    /// The same group appears twice within one period.
    DuplicateGroup {
        /// The period containing the duplicate.
        period: Period,
        /// The duplicated group.
        group_id: i32,
    },
    /// Class name is empty or invalid.
    InvalidClassName(String),
    /// Person name (student or teacher) is empty or invalid.
    InvalidName(String),
    /// Username is empty or invalid.
    InvalidUsername(String),
    /// A class cannot be merged with itself.
    SelfMerge {
        /// The class id supplied for both sides.
        class_id: i64,
    },
    /// Both source classes have no students.
    BothClassesEmpty {
        /// The first class id.
        first_class_id: i64,
        /// The second class id.
        second_class_id: i64,
    },
    /// The combined roster would exceed the class capacity.
    CapacityExceeded {
        /// Students in the first class.
        first_class_count: usize,
        /// Students in the second class.
        second_class_count: usize,
        /// The configured limit.
        limit: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Invalid date range: start {start_date} is after end {end_date}"
                )
            }
            Self::InvalidWeekday(index) => {
                write!(
                    f,
                    "Invalid weekday: {index}. Must be between 0 (Sunday) and 6 (Saturday)"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidHolidayName(msg) => write!(f, "Invalid holiday name: {msg}"),
            Self::InvalidWeeksPerTurn => {
                write!(f, "Invalid weeks per turn: must be greater than 0")
            }
            Self::InvalidTurnId(msg) => write!(f, "Invalid turn id: {msg}"),
            Self::DuplicateTurnId(turn_id) => {
                write!(f, "Turn '{turn_id}' appears more than once")
            }
            Self::InvalidPeriod(value) => {
                write!(f, "Invalid period: '{value}'. Must be 'AM' or 'PM'")
            }
            Self::MisalignedRotation {
                period,
                group_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{period} rotation for group {group_id} has {actual} entries but {expected} turns were given"
                )
            }
            Self::DuplicateGroup { period, group_id } => {
                write!(f, "Group {group_id} appears more than once in the {period} rotation")
            }
            Self::InvalidClassName(msg) => write!(f, "Invalid class name: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::SelfMerge { class_id } => {
                write!(f, "Class {class_id} cannot be combined with itself")
            }
            Self::BothClassesEmpty {
                first_class_id,
                second_class_id,
            } => {
                write!(
                    f,
                    "Classes {first_class_id} and {second_class_id} have no students to combine"
                )
            }
            Self::CapacityExceeded {
                first_class_count,
                second_class_count,
                limit,
            } => {
                write!(
                    f,
                    "Combined class would have {} students ({first_class_count} + {second_class_count}), limit is {limit}",
                    first_class_count + second_class_count
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
