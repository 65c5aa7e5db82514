// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::HashSet;
use std::sync::Mutex;

use turnus_persistence::{Persistence, TeacherData};

use crate::{
    AddStudentRequest, CreateClassRequest, CreateTeacherRequest, GroupRotationInput,
    NotificationDispatcher, NotificationError, ReplaceRotationRequest, add_student, create_class,
    create_teacher,
};

pub const BASE_URL: &str = "http://school.test/";

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn seed_teacher(persistence: &mut Persistence, last_name: &str, email: Option<&str>) -> i64 {
    create_teacher(
        persistence,
        &CreateTeacherRequest {
            first_name: String::from("Test"),
            last_name: last_name.to_string(),
            email: email.map(str::to_string),
        },
    )
    .expect("Failed to create teacher")
    .teacher_id
}

pub fn seed_class(persistence: &mut Persistence, class_name: &str, students: usize) -> i64 {
    let class_id: i64 = create_class(
        persistence,
        &CreateClassRequest {
            class_name: class_name.to_string(),
            head_teacher_id: None,
            lead_teacher_id: None,
        },
    )
    .expect("Failed to create class")
    .class_id;

    for index in 0..students {
        add_student(
            persistence,
            class_id,
            &AddStudentRequest {
                first_name: String::from("Student"),
                last_name: format!("Number{index}"),
                username: format!("{}_s{index}", class_name.to_lowercase()),
                group_id: Some(1),
            },
        )
        .expect("Failed to add student");
    }
    class_id
}

pub fn group(group_id: i32, turns: &[Option<i64>]) -> GroupRotationInput {
    GroupRotationInput {
        group_id,
        turns: turns.to_vec(),
    }
}

pub fn rotation_request(
    turns: &[&str],
    am_rotation: Vec<GroupRotationInput>,
    pm_rotation: Vec<GroupRotationInput>,
) -> ReplaceRotationRequest {
    ReplaceRotationRequest {
        turns: turns.iter().map(|turn| (*turn).to_string()).collect(),
        am_rotation,
        pm_rotation,
    }
}

/// Records every notification and fails for the configured teachers.
#[derive(Default)]
pub struct RecordingDispatcher {
    failing: HashSet<i64>,
    sent: Mutex<Vec<(i64, String, String)>>,
}

impl RecordingDispatcher {
    pub fn failing_for(teacher_ids: &[i64]) -> Self {
        Self {
            failing: teacher_ids.iter().copied().collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Returns `(teacher_id, class_name, link)` for each delivered message.
    pub fn sent(&self) -> Vec<(i64, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn notify(
        &self,
        recipient: &TeacherData,
        class_name: &str,
        link: &str,
    ) -> Result<(), NotificationError> {
        if self.failing.contains(&recipient.teacher_id) {
            return Err(NotificationError::DeliveryFailed {
                recipient: format!("teacher {}", recipient.teacher_id),
                reason: String::from("mailbox unavailable"),
            });
        }
        self.sent.lock().unwrap().push((
            recipient.teacher_id,
            class_name.to_string(),
            link.to_string(),
        ));
        Ok(())
    }
}
