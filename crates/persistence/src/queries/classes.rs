// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class lookups and roster counts.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::data_models::ClassData;
use crate::diesel_schema::{classes, students};
use crate::error::PersistenceError;

/// Diesel Queryable struct for class rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = classes)]
struct ClassRow {
    class_id: i64,
    class_name: String,
    head_teacher_id: Option<i64>,
    lead_teacher_id: Option<i64>,
}

impl ClassRow {
    fn into_data(self, student_count: usize) -> ClassData {
        ClassData {
            class_id: self.class_id,
            class_name: self.class_name,
            head_teacher_id: self.head_teacher_id,
            lead_teacher_id: self.lead_teacher_id,
            student_count,
        }
    }
}

fn to_count(value: i64) -> Result<usize, PersistenceError> {
    value
        .to_usize()
        .ok_or_else(|| PersistenceError::CorruptRecord(format!("Invalid row count: {value}")))
}

/// Counts the students currently assigned to a class.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_students(conn: &mut SqliteConnection, class_id: i64) -> Result<usize, PersistenceError> {
    let count: i64 = students::table
        .filter(students::class_id.eq(class_id))
        .count()
        .get_result(conn)?;
    to_count(count)
}

/// Retrieves a class by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the class does not exist.
pub fn get_class(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<Option<ClassData>, PersistenceError> {
    debug!(class_id, "Looking up class");

    let row: Option<ClassRow> = classes::table
        .filter(classes::class_id.eq(class_id))
        .select(ClassRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let student_count: usize = count_students(conn, class_id)?;
            Ok(Some(row.into_data(student_count)))
        }
        None => Ok(None),
    }
}

/// Retrieves a class by id, failing if it does not exist.
///
/// # Errors
///
/// Returns `PersistenceError::ClassNotFound` if the class does not exist,
/// or an error if the database query fails.
pub fn require_class(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<ClassData, PersistenceError> {
    get_class(conn, class_id)?.ok_or(PersistenceError::ClassNotFound(class_id))
}

/// Looks up the id of the class with the given name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_class_id_by_name(
    conn: &mut SqliteConnection,
    class_name: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(classes::table
        .filter(classes::class_name.eq(class_name))
        .select(classes::class_id)
        .first::<i64>(conn)
        .optional()?)
}

/// Lists all classes ordered by name, each with its roster size.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_classes(conn: &mut SqliteConnection) -> Result<Vec<ClassData>, PersistenceError> {
    let rows: Vec<ClassRow> = classes::table
        .order(classes::class_name.asc())
        .select(ClassRow::as_select())
        .load(conn)?;

    let counts: HashMap<i64, i64> = students::table
        .group_by(students::class_id)
        .select((students::class_id, count_star()))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let student_count: usize = to_count(counts.get(&row.class_id).copied().unwrap_or(0))?;
            Ok(row.into_data(student_count))
        })
        .collect()
}
