// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{seed_class, setup};
use crate::{ApiError, CombineClassesRequest, combine_classes, list_classes, list_students};

fn merge_request(first: i64, second: i64, name: &str) -> CombineClassesRequest {
    CombineClassesRequest {
        first_class_id: first,
        second_class_id: second,
        new_class_name: name.to_string(),
    }
}

#[test]
fn test_combine_classes_moves_and_renames_students() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 2);
    let second = seed_class(&mut persistence, "5B", 1);

    let response = combine_classes(&mut persistence, &merge_request(first, second, "5AB")).unwrap();

    assert_eq!(response.student_count, 3);
    assert_eq!(response.new_class.class_name, "5AB");
    assert_eq!(response.new_class.student_count, 3);
    assert_eq!(response.new_class.head_teacher_id, None);
    assert_eq!(response.original_classes.len(), 2);
    assert_eq!(response.original_classes[0].class_id, first);
    assert_eq!(response.original_classes[0].student_count, 2);
    assert_eq!(response.original_classes[1].class_name, "5B");

    let usernames: Vec<String> = list_students(&mut persistence, response.new_class.class_id)
        .unwrap()
        .students
        .into_iter()
        .map(|student| student.username)
        .collect();
    assert_eq!(usernames, vec!["5A_5a_s0", "5A_5a_s1", "5B_5b_s0"]);

    assert!(list_students(&mut persistence, first).unwrap().students.is_empty());
    assert!(list_students(&mut persistence, second).unwrap().students.is_empty());
}

#[test]
fn test_combine_classes_over_capacity_is_rejected() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 20);
    let second = seed_class(&mut persistence, "5B", 20);

    let err = combine_classes(&mut persistence, &merge_request(first, second, "5AB")).unwrap_err();

    assert_eq!(err.reason_code(), "capacity_exceeded");
    assert_eq!(
        err,
        ApiError::CapacityExceeded {
            first_class_count: 20,
            second_class_count: 20,
            total: 40,
            limit: 36,
        }
    );
    assert_eq!(list_classes(&mut persistence).unwrap().classes.len(), 2);
    assert_eq!(list_students(&mut persistence, first).unwrap().students.len(), 20);
}

#[test]
fn test_combine_class_with_itself_is_rejected() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 2);

    let err = combine_classes(&mut persistence, &merge_request(first, first, "5AA")).unwrap_err();

    assert_eq!(err.reason_code(), "validation_error");
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, ref rule, .. }
            if field == "class_ids" && rule == "self_merge"
    ));
    assert_eq!(list_classes(&mut persistence).unwrap().classes.len(), 1);
}

#[test]
fn test_combine_missing_class_is_not_found() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 2);

    let err = combine_classes(&mut persistence, &merge_request(first, 77, "5AX")).unwrap_err();
    assert_eq!(err.reason_code(), "not_found");
}

#[test]
fn test_replayed_merge_conflicts_on_class_name() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 1);
    let second = seed_class(&mut persistence, "5B", 1);
    let request = merge_request(first, second, "5AB");

    combine_classes(&mut persistence, &request).unwrap();
    let err = combine_classes(&mut persistence, &request).unwrap_err();

    assert_eq!(err.reason_code(), "conflict");
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_class_name"));
    assert_eq!(list_classes(&mut persistence).unwrap().classes.len(), 3);
}

#[test]
fn test_combine_two_empty_classes_is_rejected() {
    let mut persistence = setup();
    let first = seed_class(&mut persistence, "5A", 0);
    let second = seed_class(&mut persistence, "5B", 0);

    let err = combine_classes(&mut persistence, &merge_request(first, second, "5AB")).unwrap_err();
    assert_eq!(err.reason_code(), "validation_error");
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, ref rule, .. }
            if field == "class_ids" && rule == "both_classes_empty"
    ));
}
