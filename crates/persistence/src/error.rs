// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
use turnus_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested class does not exist.
    ClassNotFound(i64),
    /// The requested teacher does not exist.
    TeacherNotFound(i64),
    /// A class with this name already exists.
    DuplicateClassName(String),
    /// A student with this username already exists.
    DuplicateUsername(String),
    /// A teacher with this email address already exists.
    DuplicateEmail(String),
    /// No free username was found within the probe limit during a merge.
    UsernameProbeExhausted {
        /// The username whose candidates were exhausted.
        username: String,
        /// The number of candidates tried.
        attempts: usize,
    },
    /// A merged username would exceed the username length limit.
    MergedUsernameTooLong {
        /// The student's username before the merge.
        username: String,
        /// The length limit.
        limit: usize,
    },
    /// The store rejected a write on a unique constraint.
    UniqueViolation {
        /// The violated column as `table.column`.
        constraint: String,
    },
    /// A stored value could not be converted back into a domain value.
    CorruptRecord(String),
    /// A domain rule rejected the operation.
    DomainViolation(DomainError),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ClassNotFound(class_id) => write!(f, "Class {class_id} does not exist"),
            Self::TeacherNotFound(teacher_id) => {
                write!(f, "Teacher {teacher_id} does not exist")
            }
            Self::DuplicateClassName(name) => {
                write!(f, "A class named '{name}' already exists")
            }
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' is already taken")
            }
            Self::DuplicateEmail(email) => {
                write!(f, "A teacher with email '{email}' already exists")
            }
            Self::UsernameProbeExhausted { username, attempts } => {
                write!(
                    f,
                    "No free username for '{username}' after {attempts} candidates"
                )
            }
            Self::MergedUsernameTooLong { username, limit } => {
                write!(
                    f,
                    "Merged username for '{username}' would exceed {limit} characters"
                )
            }
            Self::UniqueViolation { constraint } => {
                write!(f, "Unique constraint violated on {constraint}")
            }
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Extracts `table.column` from a unique violation.
///
/// `SQLite` reports neither table nor column through the structured
/// accessors, only in the message (`UNIQUE constraint failed: t.c`).
fn unique_constraint_name(info: &dyn DatabaseErrorInformation) -> String {
    match (info.table_name(), info.column_name()) {
        (Some(table), Some(column)) => format!("{table}.{column}"),
        _ => info
            .message()
            .strip_prefix("UNIQUE constraint failed: ")
            .unwrap_or(info.message())
            .to_string(),
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: unique_constraint_name(&*info),
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
