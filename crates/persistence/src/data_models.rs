// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A stored teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherData {
    pub teacher_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// A stored class together with its current roster size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    pub class_id: i64,
    pub class_name: String,
    pub head_teacher_id: Option<i64>,
    pub lead_teacher_id: Option<i64>,
    pub student_count: usize,
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentData {
    pub student_id: i64,
    pub class_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub group_id: Option<i32>,
}

/// Input for a student insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub group_id: Option<i32>,
}

/// Roster size of a source class as it was before a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalClassSummary {
    pub class_id: i64,
    pub class_name: String,
    pub student_count: usize,
}

/// Outcome of a successful class merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineClassesResult {
    /// The newly created class, with its final roster size.
    pub new_class: ClassData,
    /// Number of students moved into the new class.
    pub student_count: usize,
    /// The two source classes in request order.
    pub original_classes: Vec<OriginalClassSummary>,
}
