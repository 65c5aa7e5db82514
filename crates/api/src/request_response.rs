// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as ISO 8601 strings (`YYYY-MM-DD`).

use serde::{Deserialize, Serialize};

// ============================================================================
// Calendar
// ============================================================================

/// An inline holiday supplied with a calendar request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInput {
    /// The holiday name.
    pub name: String,
    /// First day, inclusive.
    pub start_date: String,
    /// Last day, inclusive.
    pub end_date: String,
}

/// API request to generate the week sequence of a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCalendarRequest {
    /// First day of the range.
    pub start_date: String,
    /// Last day of the range.
    pub end_date: String,
    /// Weekday index, 0 = Sunday through 6 = Saturday.
    pub weekday: u8,
    /// Holidays to flag. When `None`, the stored holidays are used.
    pub holidays: Option<Vec<HolidayInput>>,
    /// When set, the weeks are also grouped into turns of this size.
    pub weeks_per_turn: Option<usize>,
}

/// A generated week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInfo {
    /// The date of the week's occurrence.
    pub date: String,
    /// ISO 8601 week number.
    pub iso_week: u8,
    /// Display label.
    pub label: String,
    /// Whether a holiday covers the date.
    pub is_holiday: bool,
}

/// A turn derived from the week sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Stable turn id, used by rotation requests.
    pub turn_id: String,
    /// Display name.
    pub name: String,
    /// Dates of the weeks in this turn.
    pub week_dates: Vec<String>,
    /// Number of weeks not flagged as holiday.
    pub teaching_weeks: usize,
}

/// API response for calendar generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCalendarResponse {
    /// The weeks in calendar order.
    pub weeks: Vec<WeekInfo>,
    /// The turns, present only when grouping was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turns: Option<Vec<TurnInfo>>,
}

// ============================================================================
// Holidays
// ============================================================================

/// A stored holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    /// The canonical id.
    pub holiday_id: Option<i64>,
    /// The holiday name.
    pub name: String,
    /// First day, inclusive.
    pub start_date: String,
    /// Last day, inclusive.
    pub end_date: String,
}

/// API response listing stored holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListHolidaysResponse {
    /// Holidays ordered by start date.
    pub holidays: Vec<HolidayInfo>,
}

// ============================================================================
// Teachers, Classes & Students
// ============================================================================

/// API request to create a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// A teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherInfo {
    pub teacher_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// API response listing teachers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTeachersResponse {
    pub teachers: Vec<TeacherInfo>,
}

/// API request to create a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClassRequest {
    /// The globally unique class name.
    pub class_name: String,
    pub head_teacher_id: Option<i64>,
    pub lead_teacher_id: Option<i64>,
}

/// A class with its roster size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub class_id: i64,
    pub class_name: String,
    pub head_teacher_id: Option<i64>,
    pub lead_teacher_id: Option<i64>,
    pub student_count: usize,
}

/// API response listing classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClassesResponse {
    pub classes: Vec<ClassInfo>,
}

/// API request to add a student to a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStudentRequest {
    pub first_name: String,
    pub last_name: String,
    /// Globally unique username.
    pub username: String,
    pub group_id: Option<i32>,
}

/// A student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub student_id: i64,
    pub class_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub group_id: Option<i32>,
}

/// API response listing the students of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStudentsResponse {
    pub class_id: i64,
    pub students: Vec<StudentInfo>,
}

/// Outcome of a single CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvImportRowStatus {
    /// The student was created.
    Imported,
    /// The row was rejected and nothing was written for it.
    Rejected,
}

/// Per-row result of a CSV roster import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The username from the row, if present.
    pub username: Option<String>,
    pub status: CsvImportRowStatus,
    /// Reasons for rejection.
    pub errors: Vec<String>,
}

/// API response for a CSV roster import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStudentsCsvResponse {
    pub class_id: i64,
    pub rows: Vec<CsvImportRowResult>,
    pub imported_count: usize,
    pub rejected_count: usize,
}

// ============================================================================
// Rotation
// ============================================================================

/// The per-turn teacher choices of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRotationInput {
    pub group_id: i32,
    /// Teacher per turn, positionally aligned with the request's turns.
    /// `None` leaves the group without a teacher for that turn.
    pub turns: Vec<Option<i64>>,
}

/// API request replacing the full rotation of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceRotationRequest {
    /// Turn ids, as produced by calendar generation.
    pub turns: Vec<String>,
    pub am_rotation: Vec<GroupRotationInput>,
    pub pm_rotation: Vec<GroupRotationInput>,
}

/// A notification that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFailureInfo {
    pub teacher_id: i64,
    pub message: String,
}

/// API response for a rotation replacement.
///
/// Notification failures never fail the replacement itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceRotationResponse {
    pub class_id: i64,
    /// Number of assignments now stored.
    pub assignment_count: usize,
    /// Teachers that were notified successfully.
    pub notified_teacher_ids: Vec<i64>,
    pub notification_failures: Vec<NotificationFailureInfo>,
}

/// A stored rotation assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    /// `AM` or `PM`.
    pub period: String,
    pub group_id: i32,
    pub turn_id: String,
    pub teacher_id: i64,
}

/// API response with the stored rotation of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRotationResponse {
    pub class_id: i64,
    pub assignments: Vec<AssignmentInfo>,
}

// ============================================================================
// Merge
// ============================================================================

/// API request to combine two classes into a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineClassesRequest {
    pub first_class_id: i64,
    pub second_class_id: i64,
    /// Name of the class to create.
    pub new_class_name: String,
}

/// A source class as it was before the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalClassInfo {
    pub class_id: i64,
    pub class_name: String,
    pub student_count: usize,
}

/// API response for a successful class merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineClassesResponse {
    pub new_class: ClassInfo,
    /// Final roster size of the new class.
    pub student_count: usize,
    pub original_classes: Vec<OriginalClassInfo>,
}
