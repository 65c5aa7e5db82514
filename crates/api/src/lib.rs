// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod csv_import;
mod error;
mod handlers;
mod notification;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_import::{CsvImportError, ParsedCsvRow, parse_student_csv};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_student, combine_classes, create_class, create_holiday, create_teacher,
    generate_calendar, get_class, get_rotation, import_students_csv, list_classes, list_holidays,
    list_students, list_teachers, replace_rotation,
};
pub use notification::{
    DispatchReport, NotificationDispatcher, NotificationError, dispatch_to_all, rotation_link,
};
pub use request_response::{
    AddStudentRequest, AssignmentInfo, ClassInfo, CombineClassesRequest, CombineClassesResponse,
    CreateClassRequest, CreateTeacherRequest, CsvImportRowResult, CsvImportRowStatus,
    GenerateCalendarRequest, GenerateCalendarResponse, GetRotationResponse, GroupRotationInput,
    HolidayInfo, HolidayInput, ImportStudentsCsvResponse, ListClassesResponse,
    ListHolidaysResponse, ListStudentsResponse, ListTeachersResponse, NotificationFailureInfo,
    OriginalClassInfo, ReplaceRotationRequest, ReplaceRotationResponse, StudentInfo, TeacherInfo,
    TurnInfo, WeekInfo,
};
