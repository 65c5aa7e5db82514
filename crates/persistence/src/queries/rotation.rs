// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use turnus_domain::{Period, RotationAssignment, TurnId};

use crate::diesel_schema::rotation_assignments;
use crate::error::PersistenceError;

/// Diesel Queryable struct for rotation assignment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = rotation_assignments)]
struct AssignmentRow {
    group_id: i32,
    teacher_id: i64,
    turn_id: String,
    period: String,
}

impl TryFrom<AssignmentRow> for RotationAssignment {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let period: Period = row.period.parse().map_err(|_| {
            PersistenceError::CorruptRecord(format!("Unknown period '{}'", row.period))
        })?;
        let turn_id: TurnId = TurnId::new(&row.turn_id).map_err(|_| {
            PersistenceError::CorruptRecord(format!("Invalid turn id '{}'", row.turn_id))
        })?;
        Ok(Self {
            period,
            group_id: row.group_id,
            turn_id,
            teacher_id: row.teacher_id,
        })
    }
}

/// Loads the stored rotation of a class in the order it was written.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is malformed.
pub fn get_rotation(
    conn: &mut SqliteConnection,
    class_id: i64,
) -> Result<Vec<RotationAssignment>, PersistenceError> {
    rotation_assignments::table
        .filter(rotation_assignments::class_id.eq(class_id))
        .order(rotation_assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load::<AssignmentRow>(conn)?
        .into_iter()
        .map(RotationAssignment::try_from)
        .collect()
}
