// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::StudentData;
use crate::diesel_schema::students;
use crate::error::PersistenceError;

/// Diesel Queryable struct for student rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
struct StudentRow {
    student_id: i64,
    class_id: i64,
    first_name: String,
    last_name: String,
    username: String,
    group_id: Option<i32>,
}

/// Lists the students of a class in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_students(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<Vec<StudentData>, PersistenceError> {
    let rows: Vec<StudentRow> = students::table
        .filter(students::class_id.eq(class_id))
        .order(students::student_id.asc())
        .select(StudentRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| StudentData {
            student_id: row.student_id,
            class_id: row.class_id,
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            group_id: row.group_id,
        })
        .collect())
}

/// Returns the id of the student holding `username`, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn username_owner(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(students::table
        .filter(students::username.eq(username))
        .select(students::student_id)
        .first::<i64>(conn)
        .optional()?)
}
