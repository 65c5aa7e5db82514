// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Combining two classes into a new one.
//!
//! All preconditions are checked inside the transaction before the first
//! write. The new class is created only once the merge is known to be
//! admissible, and the source classes are kept (now empty).

use std::collections::HashSet;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};
use turnus_domain::{
    MAX_USERNAME_LENGTH, provenance_username, resolve_username, username_probe_limit, validate_class_name,
    validate_combined_roster, validate_distinct_classes,
};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{ClassData, CombineClassesResult, OriginalClassSummary, StudentData};
use crate::diesel_schema::{classes, students};
use crate::error::PersistenceError;
use crate::queries::{find_class_id_by_name, list_students, require_class, username_owner};

/// Combines two classes into a newly created class.
///
/// Every student of both source classes moves to the new class and is
/// renamed to `<source class name>_<username>`. When the base username
/// was already used earlier in the same merge, or its prefixed form is
/// held by another student, the next candidate `username1`,
/// `username2`, … is tried.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `first_class_id` - The first source class
/// * `second_class_id` - The second source class
/// * `new_class_name` - The name of the class to create
///
/// # Errors
///
/// Returns an error, leaving the store unchanged, if:
/// - Both ids refer to the same class
/// - The new name is invalid or already taken
/// - Either source class does not exist
/// - Both source classes are empty
/// - The combined roster exceeds the class size limit
/// - No free username is found for a student
/// - A prefixed username would exceed the username length limit
/// - Any write fails
pub fn combine_classes(
    conn: &mut SqliteConnection,
    first_class_id: i64,
    second_class_id: i64,
    new_class_name: &str,
) -> Result<CombineClassesResult, PersistenceError> {
    validate_distinct_classes(first_class_id, second_class_id)?;
    validate_class_name(new_class_name)?;

    conn.immediate_transaction(|conn| {
        if find_class_id_by_name(conn, new_class_name)?.is_some() {
            return Err(PersistenceError::DuplicateClassName(
                new_class_name.to_string(),
            ));
        }

        let first: ClassData = require_class(conn, first_class_id)?;
        let second: ClassData = require_class(conn, second_class_id)?;
        let total: usize = validate_combined_roster(
            first.class_id,
            first.student_count,
            second.class_id,
            second.student_count,
        )?;

        diesel::insert_into(classes::table)
            .values(classes::class_name.eq(new_class_name))
            .execute(conn)?;
        let new_class_id: i64 = get_last_insert_rowid(conn)?;

        let probe_limit: usize = username_probe_limit(total);
        let mut claimed: HashSet<String> = HashSet::with_capacity(total);
        let mut moved: usize = 0;

        for source in [&first, &second] {
            for student in list_students(conn, source.class_id)? {
                let resolved: String = resolve_student_username(
                    conn,
                    &student,
                    &source.class_name,
                    &claimed,
                    probe_limit,
                )?;
                let username: String = provenance_username(&source.class_name, &resolved);
                if username.chars().count() > MAX_USERNAME_LENGTH {
                    return Err(PersistenceError::MergedUsernameTooLong {
                        username: student.username,
                        limit: MAX_USERNAME_LENGTH,
                    });
                }

                diesel::update(students::table.filter(students::student_id.eq(student.student_id)))
                    .set((
                        students::class_id.eq(new_class_id),
                        students::username.eq(&username),
                    ))
                    .execute(conn)?;

                debug!(
                    student_id = student.student_id,
                    from = %student.username,
                    to = %username,
                    "Moved student"
                );
                claimed.insert(resolved);
                moved += 1;
            }
        }

        let new_class: ClassData = require_class(conn, new_class_id)?;

        info!(
            new_class_id,
            first_class_id, second_class_id, moved, "Combined classes"
        );

        Ok(CombineClassesResult {
            new_class,
            student_count: moved,
            original_classes: vec![
                OriginalClassSummary {
                    class_id: first.class_id,
                    class_name: first.class_name,
                    student_count: first.student_count,
                },
                OriginalClassSummary {
                    class_id: second.class_id,
                    class_name: second.class_name,
                    student_count: second.student_count,
                },
            ],
        })
    })
}

/// Resolves the base username for a moving student.
///
/// A candidate is taken when its prefixed form belongs to any other student.
fn resolve_student_username(
    conn: &mut SqliteConnection,
    student: &StudentData,
    source_class_name: &str,
    claimed: &HashSet<String>,
    probe_limit: usize,
) -> Result<String, PersistenceError> {
    let resolved: Option<String> =
        resolve_username(&student.username, probe_limit, claimed, |candidate| {
            let prefixed: String = provenance_username(source_class_name, candidate);
            Ok::<bool, PersistenceError>(matches!(
                username_owner(conn, &prefixed)?,
                Some(owner) if owner != student.student_id
            ))
        })?;

    resolved.ok_or_else(|| PersistenceError::UsernameProbeExhausted {
        username: student.username.clone(),
        attempts: probe_limit,
    })
}
