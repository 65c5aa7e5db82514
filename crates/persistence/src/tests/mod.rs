// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod rotation_tests;

use crate::{NewStudent, Persistence};

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn seed_teacher(persistence: &mut Persistence, last_name: &str) -> i64 {
    persistence
        .create_teacher("Test", last_name, None)
        .expect("Failed to create teacher")
        .teacher_id
}

pub fn new_student(username: &str) -> NewStudent {
    NewStudent {
        first_name: String::from("Student"),
        last_name: username.to_uppercase(),
        username: username.to_string(),
        group_id: Some(1),
    }
}

/// Creates a class holding one student per username.
pub fn seed_class(persistence: &mut Persistence, class_name: &str, usernames: &[&str]) -> i64 {
    let class_id: i64 = persistence
        .create_class(class_name, None, None)
        .expect("Failed to create class")
        .class_id;
    for username in usernames {
        persistence
            .add_student(class_id, &new_student(username))
            .expect("Failed to add student");
    }
    class_id
}

pub fn usernames(persistence: &mut Persistence, class_id: i64) -> Vec<String> {
    persistence
        .list_students(class_id)
        .expect("Failed to list students")
        .into_iter()
        .map(|student| student.username)
        .collect()
}
