// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use turnus_domain::{DomainError, Period};
use turnus_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Every variant maps to a stable reason code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// The validation rule that was violated.
        rule: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// The id that did not resolve, when known.
        id: Option<i64>,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// The uniqueness rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A class merge would exceed the class size limit.
    CapacityExceeded {
        /// Students in the first class.
        first_class_count: usize,
        /// Students in the second class.
        second_class_count: usize,
        /// The combined roster size.
        total: usize,
        /// The class size limit.
        limit: usize,
    },
    /// An internal error occurred. Any partial write has been rolled back.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable machine-readable reason code.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation_error",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::Internal { .. } => "transaction_error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message, .. } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
                ..
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::CapacityExceeded {
                first_class_count,
                second_class_count,
                total,
                limit,
            } => {
                write!(
                    f,
                    "Combined class would have {total} students ({first_class_count} + {second_class_count}), limit is {limit}"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn invalid(field: &str, rule: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

const fn rotation_field(period: Period) -> &'static str {
    match period {
        Period::Am => "am_rotation",
        Period::Pm => "pm_rotation",
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidDateRange { .. } => invalid("end_date", "date_range_reversed", &err),
        DomainError::InvalidWeekday(_) => invalid("weekday", "weekday_out_of_range", &err),
        DomainError::DateParseError { .. } => invalid("date", "invalid_date", &err),
        DomainError::InvalidHolidayName(_) => {
            invalid("holiday_name", "invalid_holiday_name", &err)
        }
        DomainError::InvalidWeeksPerTurn => {
            invalid("weeks_per_turn", "weeks_per_turn_zero", &err)
        }
        DomainError::InvalidTurnId(_) => invalid("turns", "invalid_turn_id", &err),
        DomainError::DuplicateTurnId(_) => invalid("turns", "duplicate_turn_id", &err),
        DomainError::InvalidPeriod(_) => invalid("period", "invalid_period", &err),
        DomainError::MisalignedRotation { period, .. } => {
            invalid(rotation_field(*period), "misaligned_rotation", &err)
        }
        DomainError::DuplicateGroup { period, .. } => {
            invalid(rotation_field(*period), "duplicate_group", &err)
        }
        DomainError::InvalidClassName(_) => invalid("class_name", "invalid_class_name", &err),
        DomainError::InvalidName(_) => invalid("name", "invalid_name", &err),
        DomainError::InvalidUsername(_) => invalid("username", "invalid_username", &err),
        DomainError::SelfMerge { .. } => invalid("class_ids", "self_merge", &err),
        DomainError::BothClassesEmpty { .. } => {
            invalid("class_ids", "both_classes_empty", &err)
        }
        DomainError::CapacityExceeded {
            first_class_count,
            second_class_count,
            limit,
        } => ApiError::CapacityExceeded {
            first_class_count: *first_class_count,
            second_class_count: *second_class_count,
            total: first_class_count.saturating_add(*second_class_count),
            limit: *limit,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures become `ApiError::Internal`; the failed transaction has
/// already been rolled back by the time this runs.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::ClassNotFound(class_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Class"),
            id: Some(class_id),
            message: format!("Class {class_id} does not exist"),
        },
        PersistenceError::TeacherNotFound(teacher_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Teacher"),
            id: Some(teacher_id),
            message: format!("Teacher {teacher_id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            id: None,
            message: msg,
        },
        PersistenceError::DuplicateClassName(ref name) => ApiError::Conflict {
            rule: String::from("unique_class_name"),
            message: format!("A class named '{name}' already exists"),
        },
        PersistenceError::DuplicateUsername(ref username) => ApiError::Conflict {
            rule: String::from("unique_username"),
            message: format!("Username '{username}' is already taken"),
        },
        PersistenceError::DuplicateEmail(ref email) => ApiError::Conflict {
            rule: String::from("unique_email"),
            message: format!("A teacher with email '{email}' already exists"),
        },
        PersistenceError::UsernameProbeExhausted { .. } => ApiError::Conflict {
            rule: String::from("username_probe_exhausted"),
            message: err.to_string(),
        },
        PersistenceError::MergedUsernameTooLong { .. } => ApiError::Conflict {
            rule: String::from("username_too_long"),
            message: err.to_string(),
        },
        PersistenceError::UniqueViolation { ref constraint } => {
            let rule: &str = match constraint.as_str() {
                "classes.class_name" => "unique_class_name",
                "students.username" => "unique_username",
                "teachers.email" => "unique_email",
                _ => "unique_constraint",
            };
            ApiError::Conflict {
                rule: String::from(rule),
                message: err.to_string(),
            }
        }
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::CorruptRecord(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
