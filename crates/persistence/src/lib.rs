// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Turnus scheduling system.
//!
//! This crate stores teachers, classes, students, holidays and class
//! rotations in `SQLite` via Diesel. Rotation replacement and class
//! merges are the two multi-row writes; each runs in a single immediate
//! transaction and either fully applies or leaves the store unchanged.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which hands out an isolated
//! shared-cache in-memory database per call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use turnus_domain::{Holiday, RotationAssignment, RotationPlan};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ClassData, CombineClassesResult, NewStudent, OriginalClassSummary, StudentData, TeacherData,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_turnus_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Teachers
    // ========================================================================

    /// Creates a teacher.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid, the email is taken, or the insert fails.
    pub fn create_teacher(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> Result<TeacherData, PersistenceError> {
        mutations::create_teacher(&mut self.conn, first_name, last_name, email)
    }

    /// Lists all teachers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_teachers(&mut self) -> Result<Vec<TeacherData>, PersistenceError> {
        queries::list_teachers(&mut self.conn)
    }

    // ========================================================================
    // Classes & Students
    // ========================================================================

    /// Creates an empty class.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or taken, or a referenced
    /// teacher does not exist.
    pub fn create_class(
        &mut self,
        class_name: &str,
        head_teacher_id: Option<i64>,
        lead_teacher_id: Option<i64>,
    ) -> Result<ClassData, PersistenceError> {
        mutations::create_class(&mut self.conn, class_name, head_teacher_id, lead_teacher_id)
    }

    /// Retrieves a class with its roster size.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClassNotFound` if the class does not exist.
    pub fn get_class(&mut self, class_id: i64) -> Result<ClassData, PersistenceError> {
        queries::require_class(&mut self.conn, class_id)
    }

    /// Lists all classes ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_classes(&mut self) -> Result<Vec<ClassData>, PersistenceError> {
        queries::list_classes(&mut self.conn)
    }

    /// Adds a student to a class.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is invalid, the class does not exist,
    /// or the username is taken.
    pub fn add_student(
        &mut self,
        class_id: i64,
        student: &NewStudent,
    ) -> Result<StudentData, PersistenceError> {
        mutations::add_student(&mut self.conn, class_id, student)
    }

    /// Lists the students of a class.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClassNotFound` if the class does not exist.
    pub fn list_students(&mut self, class_id: i64) -> Result<Vec<StudentData>, PersistenceError> {
        queries::require_class(&mut self.conn, class_id)?;
        queries::list_students(&mut self.conn, class_id)
    }

    /// Combines two classes into a newly created class.
    ///
    /// See `mutations::merge::combine_classes` for the username rules.
    ///
    /// # Errors
    ///
    /// Returns an error if any precondition fails or a write fails. The
    /// store is unchanged in that case.
    pub fn combine_classes(
        &mut self,
        first_class_id: i64,
        second_class_id: i64,
        new_class_name: &str,
    ) -> Result<CombineClassesResult, PersistenceError> {
        mutations::combine_classes(
            &mut self.conn,
            first_class_id,
            second_class_id,
            new_class_name,
        )
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// Replaces the stored rotation of a class.
    ///
    /// # Returns
    ///
    /// The number of assignments now stored for the class.
    ///
    /// # Errors
    ///
    /// Returns an error if the class or a referenced teacher does not exist,
    /// or if any write fails. The previous rotation is kept in that case.
    pub fn replace_rotation(
        &mut self,
        class_id: i64,
        plan: &RotationPlan,
    ) -> Result<usize, PersistenceError> {
        mutations::replace_rotation(&mut self.conn, class_id, plan)
    }

    /// Loads the stored rotation of a class.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClassNotFound` if the class does not exist.
    pub fn get_rotation(
        &mut self,
        class_id: i64,
    ) -> Result<Vec<RotationAssignment>, PersistenceError> {
        queries::require_class(&mut self.conn, class_id)?;
        queries::get_rotation(&mut self.conn, class_id)
    }

    // ========================================================================
    // Holidays
    // ========================================================================

    /// Stores a holiday.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_holiday(&mut self, holiday: &Holiday) -> Result<Holiday, PersistenceError> {
        mutations::create_holiday(&mut self.conn, holiday)
    }

    /// Lists all stored holidays ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_holidays(&mut self) -> Result<Vec<Holiday>, PersistenceError> {
        queries::list_holidays(&mut self.conn)
    }
}
