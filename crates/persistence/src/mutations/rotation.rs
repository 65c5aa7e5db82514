// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Full-state rotation replacement.
//!
//! The stored rotation of a class is always exactly the last plan
//! written for it. Replacement deletes every row of the class and
//! inserts the new plan in one transaction, so a failed write leaves
//! the previous rotation untouched and repeating a request is a no-op.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};
use turnus_domain::RotationPlan;

use crate::diesel_schema::rotation_assignments;
use crate::error::PersistenceError;
use crate::queries::{find_missing_teacher, require_class};

/// Replaces the stored rotation of a class with `plan`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `class_id` - The class whose rotation is replaced
/// * `plan` - The validated full rotation state
///
/// # Returns
///
/// The number of assignments now stored for the class.
///
/// # Errors
///
/// Returns an error if the class or a referenced teacher does not exist,
/// or if any write fails. Nothing is changed in that case.
pub fn replace_rotation(
    conn: &mut SqliteConnection,
    class_id: i64,
    plan: &RotationPlan,
) -> Result<usize, PersistenceError> {
    conn.immediate_transaction(|conn| {
        require_class(conn, class_id)?;
        if let Some(missing) = find_missing_teacher(conn, &plan.teacher_ids())? {
            return Err(PersistenceError::TeacherNotFound(missing));
        }
        write_rotation(conn, class_id, plan)
    })
}

/// Deletes all rotation rows of a class and inserts the plan.
///
/// Must run inside a transaction.
pub(crate) fn write_rotation(
    conn: &mut SqliteConnection,
    class_id: i64,
    plan: &RotationPlan,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        rotation_assignments::table.filter(rotation_assignments::class_id.eq(class_id)),
    )
    .execute(conn)?;
    debug!(class_id, removed, "Cleared previous rotation");

    if plan.is_empty() {
        info!(class_id, "Rotation cleared");
        return Ok(0);
    }

    let rows: Vec<_> = plan
        .assignments()
        .iter()
        .map(|assignment| {
            (
                rotation_assignments::class_id.eq(class_id),
                rotation_assignments::group_id.eq(assignment.group_id),
                rotation_assignments::teacher_id.eq(assignment.teacher_id),
                rotation_assignments::turn_id.eq(assignment.turn_id.value()),
                rotation_assignments::period.eq(assignment.period.as_str()),
            )
        })
        .collect();

    let inserted: usize = diesel::insert_into(rotation_assignments::table)
        .values(&rows)
        .execute(conn)?;

    info!(class_id, inserted, "Rotation replaced");
    Ok(inserted)
}
