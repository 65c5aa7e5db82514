// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for scheduling and class administration.
//!
//! Handlers validate and translate request DTOs, call into the domain and
//! persistence layers, and translate every failure into an `ApiError`.

use std::collections::HashSet;

use time::Date;
use tracing::{info, warn};
use turnus_domain::{
    GroupRotation, Holiday, RotationAssignment, RotationPlan, Turn, TurnId, Week,
    build_rotation_plan, generate_weeks, parse_iso_date, split_into_turns,
};
use turnus_persistence::{
    ClassData, CombineClassesResult, Persistence, PersistenceError, StudentData, TeacherData,
};

use crate::csv_import::{ParsedCsvRow, parse_student_csv};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::notification::{DispatchReport, NotificationDispatcher, dispatch_to_all, rotation_link};
use crate::request_response::{
    AddStudentRequest, AssignmentInfo, ClassInfo, CombineClassesRequest, CombineClassesResponse,
    CreateClassRequest, CreateTeacherRequest, CsvImportRowResult, CsvImportRowStatus,
    GenerateCalendarRequest, GenerateCalendarResponse, GetRotationResponse, GroupRotationInput,
    HolidayInfo, HolidayInput, ImportStudentsCsvResponse, ListClassesResponse,
    ListHolidaysResponse, ListStudentsResponse, ListTeachersResponse, OriginalClassInfo,
    ReplaceRotationRequest, ReplaceRotationResponse, StudentInfo, TeacherInfo, TurnInfo, WeekInfo,
};

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        rule: String::from("invalid_date"),
        message: e.to_string(),
    })
}

fn parse_holiday(input: &HolidayInput) -> Result<Holiday, ApiError> {
    let start_date: Date = parse_date_field("holidays.start_date", &input.start_date)?;
    let end_date: Date = parse_date_field("holidays.end_date", &input.end_date)?;
    Holiday::new(&input.name, start_date, end_date).map_err(translate_domain_error)
}

fn holiday_info(holiday: &Holiday) -> HolidayInfo {
    HolidayInfo {
        holiday_id: holiday.holiday_id(),
        name: holiday.name().to_string(),
        start_date: holiday.start_date().to_string(),
        end_date: holiday.end_date().to_string(),
    }
}

fn week_info(week: &Week) -> WeekInfo {
    WeekInfo {
        date: week.date.to_string(),
        iso_week: week.iso_week,
        label: week.label.clone(),
        is_holiday: week.is_holiday,
    }
}

fn turn_info(turn: &Turn) -> TurnInfo {
    TurnInfo {
        turn_id: turn.turn_id().value().to_string(),
        name: turn.name().to_string(),
        week_dates: turn.weeks().iter().map(|week| week.date.to_string()).collect(),
        teaching_weeks: turn.teaching_weeks(),
    }
}

fn teacher_info(teacher: TeacherData) -> TeacherInfo {
    TeacherInfo {
        teacher_id: teacher.teacher_id,
        first_name: teacher.first_name,
        last_name: teacher.last_name,
        email: teacher.email,
    }
}

fn class_info(class: ClassData) -> ClassInfo {
    ClassInfo {
        class_id: class.class_id,
        class_name: class.class_name,
        head_teacher_id: class.head_teacher_id,
        lead_teacher_id: class.lead_teacher_id,
        student_count: class.student_count,
    }
}

fn student_info(student: StudentData) -> StudentInfo {
    StudentInfo {
        student_id: student.student_id,
        class_id: student.class_id,
        first_name: student.first_name,
        last_name: student.last_name,
        username: student.username,
        group_id: student.group_id,
    }
}

fn assignment_info(assignment: &RotationAssignment) -> AssignmentInfo {
    AssignmentInfo {
        period: assignment.period.as_str().to_string(),
        group_id: assignment.group_id,
        turn_id: assignment.turn_id.value().to_string(),
        teacher_id: assignment.teacher_id,
    }
}

// ============================================================================
// Calendar & Holidays
// ============================================================================

/// Generates the week sequence for a date range and weekday.
///
/// Inline holidays take precedence; when none are supplied the stored
/// holidays are used. The computation itself reads no other state.
///
/// # Arguments
///
/// * `persistence` - The persistence layer, read only for stored holidays
/// * `request` - The calendar request
///
/// # Errors
///
/// Returns an error if:
/// - A date cannot be parsed
/// - The range is reversed or the weekday is out of range
/// - `weeks_per_turn` is 0
/// - Stored holidays cannot be read
pub fn generate_calendar(
    persistence: &mut Persistence,
    request: &GenerateCalendarRequest,
) -> Result<GenerateCalendarResponse, ApiError> {
    let start_date: Date = parse_date_field("start_date", &request.start_date)?;
    let end_date: Date = parse_date_field("end_date", &request.end_date)?;

    let holidays: Vec<Holiday> = match &request.holidays {
        Some(inputs) => inputs
            .iter()
            .map(parse_holiday)
            .collect::<Result<_, _>>()?,
        None => persistence
            .list_holidays()
            .map_err(translate_persistence_error)?,
    };

    let weeks: Vec<Week> = generate_weeks(start_date, end_date, request.weekday, &holidays)
        .map_err(translate_domain_error)?;

    let turns: Option<Vec<TurnInfo>> = request
        .weeks_per_turn
        .map(|weeks_per_turn| {
            split_into_turns(&weeks, weeks_per_turn)
                .map(|turns| turns.iter().map(turn_info).collect())
                .map_err(translate_domain_error)
        })
        .transpose()?;

    info!(
        start_date = %start_date,
        end_date = %end_date,
        weekday = request.weekday,
        week_count = weeks.len(),
        "Generated calendar"
    );

    Ok(GenerateCalendarResponse {
        weeks: weeks.iter().map(week_info).collect(),
        turns,
    })
}

/// Stores a holiday.
///
/// # Errors
///
/// Returns an error if the dates cannot be parsed, the interval is reversed,
/// the name is empty, or the insert fails.
pub fn create_holiday(
    persistence: &mut Persistence,
    request: &HolidayInput,
) -> Result<HolidayInfo, ApiError> {
    let holiday: Holiday = parse_holiday(request)?;
    let stored: Holiday = persistence
        .create_holiday(&holiday)
        .map_err(translate_persistence_error)?;
    Ok(holiday_info(&stored))
}

/// Lists stored holidays.
///
/// # Errors
///
/// Returns an error if the holidays cannot be read.
pub fn list_holidays(persistence: &mut Persistence) -> Result<ListHolidaysResponse, ApiError> {
    let holidays: Vec<Holiday> = persistence
        .list_holidays()
        .map_err(translate_persistence_error)?;
    Ok(ListHolidaysResponse {
        holidays: holidays.iter().map(holiday_info).collect(),
    })
}

// ============================================================================
// Teachers, Classes & Students
// ============================================================================

/// Creates a teacher.
///
/// # Errors
///
/// Returns an error if a name is invalid or the email is already in use.
pub fn create_teacher(
    persistence: &mut Persistence,
    request: &CreateTeacherRequest,
) -> Result<TeacherInfo, ApiError> {
    persistence
        .create_teacher(
            &request.first_name,
            &request.last_name,
            request.email.as_deref(),
        )
        .map(teacher_info)
        .map_err(translate_persistence_error)
}

/// Lists all teachers.
///
/// # Errors
///
/// Returns an error if the teachers cannot be read.
pub fn list_teachers(persistence: &mut Persistence) -> Result<ListTeachersResponse, ApiError> {
    let teachers: Vec<TeacherData> = persistence
        .list_teachers()
        .map_err(translate_persistence_error)?;
    Ok(ListTeachersResponse {
        teachers: teachers.into_iter().map(teacher_info).collect(),
    })
}

/// Creates an empty class.
///
/// # Errors
///
/// Returns an error if the name is invalid or taken, or a referenced
/// teacher does not exist.
pub fn create_class(
    persistence: &mut Persistence,
    request: &CreateClassRequest,
) -> Result<ClassInfo, ApiError> {
    persistence
        .create_class(
            request.class_name.trim(),
            request.head_teacher_id,
            request.lead_teacher_id,
        )
        .map(class_info)
        .map_err(translate_persistence_error)
}

/// Retrieves a class.
///
/// # Errors
///
/// Returns an error if the class does not exist.
pub fn get_class(persistence: &mut Persistence, class_id: i64) -> Result<ClassInfo, ApiError> {
    persistence
        .get_class(class_id)
        .map(class_info)
        .map_err(translate_persistence_error)
}

/// Lists all classes with their roster sizes.
///
/// # Errors
///
/// Returns an error if the classes cannot be read.
pub fn list_classes(persistence: &mut Persistence) -> Result<ListClassesResponse, ApiError> {
    let classes: Vec<ClassData> = persistence
        .list_classes()
        .map_err(translate_persistence_error)?;
    Ok(ListClassesResponse {
        classes: classes.into_iter().map(class_info).collect(),
    })
}

/// Adds a student to a class.
///
/// # Errors
///
/// Returns an error if a field is invalid, the class does not exist, or
/// the username is taken.
pub fn add_student(
    persistence: &mut Persistence,
    class_id: i64,
    request: &AddStudentRequest,
) -> Result<StudentInfo, ApiError> {
    let student = turnus_persistence::NewStudent {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        username: request.username.trim().to_string(),
        group_id: request.group_id,
    };
    persistence
        .add_student(class_id, &student)
        .map(student_info)
        .map_err(translate_persistence_error)
}

/// Lists the students of a class.
///
/// # Errors
///
/// Returns an error if the class does not exist.
pub fn list_students(
    persistence: &mut Persistence,
    class_id: i64,
) -> Result<ListStudentsResponse, ApiError> {
    let students: Vec<StudentData> = persistence
        .list_students(class_id)
        .map_err(translate_persistence_error)?;
    Ok(ListStudentsResponse {
        class_id,
        students: students.into_iter().map(student_info).collect(),
    })
}

/// Imports students into a class from CSV content.
///
/// Valid rows are inserted one by one; rows that fail validation or are
/// rejected by the store are reported and skipped.
///
/// # Errors
///
/// Returns an error if the class does not exist or the CSV header is
/// unusable. Row-level problems never fail the import.
pub fn import_students_csv(
    persistence: &mut Persistence,
    class_id: i64,
    csv_content: &str,
) -> Result<ImportStudentsCsvResponse, ApiError> {
    persistence
        .get_class(class_id)
        .map_err(translate_persistence_error)?;
    let parsed: Vec<ParsedCsvRow> = parse_student_csv(csv_content)?;

    let mut rows: Vec<CsvImportRowResult> = Vec::with_capacity(parsed.len());
    for row in parsed {
        let errors: Vec<String> = match row.outcome {
            Ok(student) => match persistence.add_student(class_id, &student) {
                Ok(_) => Vec::new(),
                Err(
                    e @ (PersistenceError::DuplicateUsername(_)
                    | PersistenceError::DomainViolation(_)),
                ) => vec![e.to_string()],
                Err(e) => return Err(translate_persistence_error(e)),
            },
            Err(errors) => errors,
        };

        let status: CsvImportRowStatus = if errors.is_empty() {
            CsvImportRowStatus::Imported
        } else {
            CsvImportRowStatus::Rejected
        };
        rows.push(CsvImportRowResult {
            row_number: row.row_number,
            username: row.username,
            status,
            errors,
        });
    }

    let imported_count: usize = rows
        .iter()
        .filter(|r| r.status == CsvImportRowStatus::Imported)
        .count();
    let rejected_count: usize = rows.len() - imported_count;

    info!(class_id, imported_count, rejected_count, "Imported students from CSV");

    Ok(ImportStudentsCsvResponse {
        class_id,
        rows,
        imported_count,
        rejected_count,
    })
}

// ============================================================================
// Rotation
// ============================================================================

fn to_group_rotations(inputs: &[GroupRotationInput]) -> Vec<GroupRotation> {
    inputs
        .iter()
        .map(|input| GroupRotation::new(input.group_id, input.turns.clone()))
        .collect()
}

/// Replaces the full rotation of a class and notifies its teachers.
///
/// The request is the complete desired state. Every stored assignment of
/// the class is replaced atomically; repeating a request is a no-op. After
/// a successful write each distinct assigned teacher is notified once.
/// Notification failures are reported in the response and never undo the
/// replacement.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `class_id` - The class whose rotation is replaced
/// * `request` - Turn ids and per-group teacher choices for both periods
/// * `dispatcher` - Delivers teacher notifications
/// * `public_base_url` - Base URL used to build the rotation link
///
/// # Errors
///
/// Returns an error, leaving the stored rotation unchanged, if:
/// - A turn id is empty or repeated
/// - A group appears twice in one period
/// - A group's entries do not align with the turns
/// - The class or a referenced teacher does not exist
/// - The write fails
pub fn replace_rotation(
    persistence: &mut Persistence,
    class_id: i64,
    request: &ReplaceRotationRequest,
    dispatcher: &dyn NotificationDispatcher,
    public_base_url: &str,
) -> Result<ReplaceRotationResponse, ApiError> {
    let turns: Vec<TurnId> = request
        .turns
        .iter()
        .map(|turn| TurnId::new(turn))
        .collect::<Result<_, _>>()
        .map_err(translate_domain_error)?;

    let plan: RotationPlan = build_rotation_plan(
        &turns,
        &to_group_rotations(&request.am_rotation),
        &to_group_rotations(&request.pm_rotation),
    )
    .map_err(translate_domain_error)?;

    let assignment_count: usize = persistence
        .replace_rotation(class_id, &plan)
        .map_err(translate_persistence_error)?;

    info!(class_id, assignment_count, "Rotation replaced");

    let report: DispatchReport = notify_assigned_teachers(
        persistence,
        class_id,
        &plan,
        dispatcher,
        public_base_url,
    );

    Ok(ReplaceRotationResponse {
        class_id,
        assignment_count,
        notified_teacher_ids: report.delivered,
        notification_failures: report.failures,
    })
}

/// Resolves the teachers of a stored plan and notifies them.
///
/// Runs after the rotation is committed, so lookup failures are logged
/// and reported instead of returned.
fn notify_assigned_teachers(
    persistence: &mut Persistence,
    class_id: i64,
    plan: &RotationPlan,
    dispatcher: &dyn NotificationDispatcher,
    public_base_url: &str,
) -> DispatchReport {
    if plan.is_empty() {
        return DispatchReport::default();
    }

    let lookup = persistence.get_class(class_id).and_then(|class| {
        persistence
            .list_teachers()
            .map(|teachers| (class.class_name, teachers))
    });

    let (class_name, teachers): (String, Vec<TeacherData>) = match lookup {
        Ok(found) => found,
        Err(e) => {
            warn!(class_id, error = %e, "Skipping rotation notifications");
            return DispatchReport::default();
        }
    };

    let assigned: HashSet<i64> = plan.teacher_ids().into_iter().collect();
    let recipients: Vec<TeacherData> = teachers
        .into_iter()
        .filter(|teacher| assigned.contains(&teacher.teacher_id))
        .collect();

    dispatch_to_all(
        dispatcher,
        &recipients,
        &class_name,
        &rotation_link(public_base_url, class_id),
    )
}

/// Retrieves the stored rotation of a class.
///
/// # Errors
///
/// Returns an error if the class does not exist or the rows cannot be read.
pub fn get_rotation(
    persistence: &mut Persistence,
    class_id: i64,
) -> Result<GetRotationResponse, ApiError> {
    let assignments: Vec<RotationAssignment> = persistence
        .get_rotation(class_id)
        .map_err(translate_persistence_error)?;
    Ok(GetRotationResponse {
        class_id,
        assignments: assignments.iter().map(assignment_info).collect(),
    })
}

// ============================================================================
// Merge
// ============================================================================

/// Combines two classes into a newly created class.
///
/// Not idempotent: replaying a successful request fails on the duplicate
/// class name and changes nothing.
///
/// # Errors
///
/// Returns an error, leaving the store unchanged, if:
/// - Both ids are equal, or both classes are empty (`validation_error`)
/// - A class does not exist (`not_found`)
/// - The new name is taken, or no free username is found (`conflict`)
/// - The combined roster exceeds the limit (`capacity_exceeded`)
/// - The write fails (`transaction_error`)
pub fn combine_classes(
    persistence: &mut Persistence,
    request: &CombineClassesRequest,
) -> Result<CombineClassesResponse, ApiError> {
    let result: CombineClassesResult = persistence
        .combine_classes(
            request.first_class_id,
            request.second_class_id,
            request.new_class_name.trim(),
        )
        .map_err(translate_persistence_error)?;

    Ok(CombineClassesResponse {
        student_count: result.student_count,
        new_class: class_info(result.new_class),
        original_classes: result
            .original_classes
            .into_iter()
            .map(|original| OriginalClassInfo {
                class_id: original.class_id,
                class_name: original.class_name,
                student_count: original.student_count,
            })
            .collect(),
    })
}
