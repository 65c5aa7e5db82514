// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::TeacherData;
use crate::diesel_schema::teachers;
use crate::error::PersistenceError;

/// Diesel Queryable struct for teacher rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teachers)]
struct TeacherRow {
    teacher_id: i64,
    first_name: String,
    last_name: String,
    email: Option<String>,
}

/// Lists all teachers ordered by last name, then first name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_teachers(conn: &mut SqliteConnection) -> Result<Vec<TeacherData>, PersistenceError> {
    let rows: Vec<TeacherRow> = teachers::table
        .order((
            teachers::last_name.asc(),
            teachers::first_name.asc(),
            teachers::teacher_id.asc(),
        ))
        .select(TeacherRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| TeacherData {
            teacher_id: row.teacher_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        })
        .collect())
}

/// Returns the first of `teacher_ids` that does not exist, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_missing_teacher(
    conn: &mut SqliteConnection,
    teacher_ids: &[i64],
) -> Result<Option<i64>, PersistenceError> {
    if teacher_ids.is_empty() {
        return Ok(None);
    }

    let existing: HashSet<i64> = teachers::table
        .filter(teachers::teacher_id.eq_any(teacher_ids))
        .select(teachers::teacher_id)
        .load::<i64>(conn)?
        .into_iter()
        .collect();

    Ok(teacher_ids
        .iter()
        .copied()
        .find(|teacher_id| !existing.contains(teacher_id)))
}
