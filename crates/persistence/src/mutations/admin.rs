// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative inserts: teachers, classes, students and holidays.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use turnus_domain::{Holiday, validate_class_name, validate_person_name, validate_username};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{ClassData, NewStudent, StudentData, TeacherData};
use crate::diesel_schema::{classes, holidays, students, teachers};
use crate::error::PersistenceError;
use crate::queries::{find_class_id_by_name, find_missing_teacher, require_class, username_owner};

/// Creates a teacher.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `first_name` - The first name
/// * `last_name` - The last name
/// * `email` - Optional contact address, unique when present
///
/// # Errors
///
/// Returns an error if a name is invalid, the email is already in use,
/// or the insert fails.
pub fn create_teacher(
    conn: &mut SqliteConnection,
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
) -> Result<TeacherData, PersistenceError> {
    validate_person_name("First name", first_name)?;
    validate_person_name("Last name", last_name)?;
    let email: Option<String> = email
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    conn.immediate_transaction(|conn| {
        if let Some(address) = &email {
            let taken: bool = teachers::table
                .filter(teachers::email.eq(address))
                .count()
                .get_result::<i64>(conn)?
                > 0;
            if taken {
                return Err(PersistenceError::DuplicateEmail(address.clone()));
            }
        }

        diesel::insert_into(teachers::table)
            .values((
                teachers::first_name.eq(first_name.trim()),
                teachers::last_name.eq(last_name.trim()),
                teachers::email.eq(&email),
            ))
            .execute(conn)?;
        let teacher_id: i64 = get_last_insert_rowid(conn)?;

        info!(teacher_id, "Created teacher");

        Ok(TeacherData {
            teacher_id,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.clone(),
        })
    })
}

/// Creates an empty class.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `class_name` - The unique class name
/// * `head_teacher_id` - Optional head teacher
/// * `lead_teacher_id` - Optional lead teacher
///
/// # Errors
///
/// Returns an error if the name is invalid or taken, a referenced teacher
/// does not exist, or the insert fails.
pub fn create_class(
    conn: &mut SqliteConnection,
    class_name: &str,
    head_teacher_id: Option<i64>,
    lead_teacher_id: Option<i64>,
) -> Result<ClassData, PersistenceError> {
    validate_class_name(class_name)?;

    conn.immediate_transaction(|conn| {
        if find_class_id_by_name(conn, class_name)?.is_some() {
            return Err(PersistenceError::DuplicateClassName(class_name.to_string()));
        }

        let referenced: Vec<i64> = head_teacher_id.into_iter().chain(lead_teacher_id).collect();
        if let Some(missing) = find_missing_teacher(conn, &referenced)? {
            return Err(PersistenceError::TeacherNotFound(missing));
        }

        diesel::insert_into(classes::table)
            .values((
                classes::class_name.eq(class_name),
                classes::head_teacher_id.eq(head_teacher_id),
                classes::lead_teacher_id.eq(lead_teacher_id),
            ))
            .execute(conn)?;
        let class_id: i64 = get_last_insert_rowid(conn)?;

        info!(class_id, class_name, "Created class");

        Ok(ClassData {
            class_id,
            class_name: class_name.to_string(),
            head_teacher_id,
            lead_teacher_id,
            student_count: 0,
        })
    })
}

/// Adds a student to an existing class.
///
/// # Errors
///
/// Returns an error if a field is invalid, the class does not exist,
/// the username is taken, or the insert fails.
pub fn add_student(
    conn: &mut SqliteConnection,
    class_id: i64,
    student: &NewStudent,
) -> Result<StudentData, PersistenceError> {
    validate_person_name("First name", &student.first_name)?;
    validate_person_name("Last name", &student.last_name)?;
    validate_username(&student.username)?;

    conn.immediate_transaction(|conn| {
        require_class(conn, class_id)?;
        if username_owner(conn, &student.username)?.is_some() {
            return Err(PersistenceError::DuplicateUsername(student.username.clone()));
        }

        diesel::insert_into(students::table)
            .values((
                students::class_id.eq(class_id),
                students::first_name.eq(student.first_name.trim()),
                students::last_name.eq(student.last_name.trim()),
                students::username.eq(&student.username),
                students::group_id.eq(student.group_id),
            ))
            .execute(conn)?;
        let student_id: i64 = get_last_insert_rowid(conn)?;

        info!(student_id, class_id, username = %student.username, "Added student");

        Ok(StudentData {
            student_id,
            class_id,
            first_name: student.first_name.trim().to_string(),
            last_name: student.last_name.trim().to_string(),
            username: student.username.clone(),
            group_id: student.group_id,
        })
    })
}

/// Stores a holiday and returns it with its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_holiday(
    conn: &mut SqliteConnection,
    holiday: &Holiday,
) -> Result<Holiday, PersistenceError> {
    diesel::insert_into(holidays::table)
        .values((
            holidays::name.eq(holiday.name()),
            holidays::start_date.eq(holiday.start_date().to_string()),
            holidays::end_date.eq(holiday.end_date().to_string()),
        ))
        .execute(conn)?;
    let holiday_id: i64 = get_last_insert_rowid(conn)?;

    info!(holiday_id, name = holiday.name(), "Created holiday");

    Ok(Holiday::with_id(
        Some(holiday_id),
        holiday.name(),
        holiday.start_date(),
        holiday.end_date(),
    )?)
}
