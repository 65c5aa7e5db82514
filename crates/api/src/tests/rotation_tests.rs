// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    BASE_URL, RecordingDispatcher, group, rotation_request, seed_class, seed_teacher, setup,
};
use crate::{ApiError, AssignmentInfo, get_rotation, replace_rotation};

#[test]
fn test_replace_rotation_stores_every_assignment() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 2);
    let t1 = seed_teacher(&mut persistence, "Ahl", Some("ahl@school.test"));
    let t2 = seed_teacher(&mut persistence, "Berg", Some("berg@school.test"));
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(
        &["T1", "T2"],
        vec![group(1, &[Some(t1), Some(t2)]), group(2, &[Some(t2), None])],
        vec![group(1, &[None, Some(t1)])],
    );
    let response =
        replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();

    assert_eq!(response.class_id, class_id);
    assert_eq!(response.assignment_count, 4);

    let stored = get_rotation(&mut persistence, class_id).unwrap();
    assert_eq!(
        stored.assignments,
        vec![
            AssignmentInfo {
                period: String::from("AM"),
                group_id: 1,
                turn_id: String::from("T1"),
                teacher_id: t1,
            },
            AssignmentInfo {
                period: String::from("AM"),
                group_id: 1,
                turn_id: String::from("T2"),
                teacher_id: t2,
            },
            AssignmentInfo {
                period: String::from("AM"),
                group_id: 2,
                turn_id: String::from("T1"),
                teacher_id: t2,
            },
            AssignmentInfo {
                period: String::from("PM"),
                group_id: 1,
                turn_id: String::from("T2"),
                teacher_id: t1,
            },
        ]
    );
}

#[test]
fn test_replace_rotation_is_idempotent() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let dispatcher = RecordingDispatcher::default();
    let request = rotation_request(&["T1"], vec![group(1, &[Some(t1)])], Vec::new());

    replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();
    let first = get_rotation(&mut persistence, class_id).unwrap();
    replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();
    let second = get_rotation(&mut persistence, class_id).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.assignments.len(), 1);
}

#[test]
fn test_replace_rotation_supersedes_previous_rotation() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let t2 = seed_teacher(&mut persistence, "Berg", None);
    let dispatcher = RecordingDispatcher::default();

    let original = rotation_request(
        &["T1", "T2"],
        vec![group(1, &[Some(t1), Some(t1)])],
        vec![group(1, &[Some(t1), Some(t1)])],
    );
    replace_rotation(&mut persistence, class_id, &original, &dispatcher, BASE_URL).unwrap();

    let replacement = rotation_request(&["T3"], vec![group(4, &[Some(t2)])], Vec::new());
    replace_rotation(&mut persistence, class_id, &replacement, &dispatcher, BASE_URL).unwrap();

    let stored = get_rotation(&mut persistence, class_id).unwrap();
    assert_eq!(stored.assignments.len(), 1);
    assert_eq!(stored.assignments[0].turn_id, "T3");
    assert_eq!(stored.assignments[0].teacher_id, t2);
}

#[test]
fn test_replace_rotation_with_empty_request_clears_rotation() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(&["T1"], vec![group(1, &[Some(t1)])], Vec::new());
    replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();
    let sent_before = dispatcher.sent().len();

    let empty = rotation_request(&["T1"], vec![group(1, &[None])], Vec::new());
    let response =
        replace_rotation(&mut persistence, class_id, &empty, &dispatcher, BASE_URL).unwrap();

    assert_eq!(response.assignment_count, 0);
    assert!(response.notified_teacher_ids.is_empty());
    assert_eq!(dispatcher.sent().len(), sent_before);
    assert!(
        get_rotation(&mut persistence, class_id)
            .unwrap()
            .assignments
            .is_empty()
    );
}

#[test]
fn test_replace_rotation_notifies_each_teacher_once() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", Some("ahl@school.test"));
    let t2 = seed_teacher(&mut persistence, "Berg", Some("berg@school.test"));
    let bystander = seed_teacher(&mut persistence, "Dahl", Some("dahl@school.test"));
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(
        &["T1", "T2"],
        vec![group(1, &[Some(t1), Some(t2)])],
        vec![group(1, &[Some(t1), Some(t1)])],
    );
    let response =
        replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();

    let mut notified = response.notified_teacher_ids.clone();
    notified.sort_unstable();
    assert_eq!(notified, vec![t1, t2]);
    assert!(!notified.contains(&bystander));

    let sent = dispatcher.sent();
    assert_eq!(sent.len(), 2);
    for (_, class_name, link) in &sent {
        assert_eq!(class_name, "5A");
        assert_eq!(link, &format!("http://school.test/classes/{class_id}/rotation"));
    }
}

#[test]
fn test_notification_failure_does_not_fail_replacement() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", Some("ahl@school.test"));
    let t2 = seed_teacher(&mut persistence, "Berg", Some("berg@school.test"));
    let dispatcher = RecordingDispatcher::failing_for(&[t2]);

    let request = rotation_request(&["T1", "T2"], vec![group(1, &[Some(t1), Some(t2)])], Vec::new());
    let response =
        replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap();

    assert_eq!(response.assignment_count, 2);
    assert_eq!(response.notified_teacher_ids, vec![t1]);
    assert_eq!(response.notification_failures.len(), 1);
    assert_eq!(response.notification_failures[0].teacher_id, t2);
    assert_eq!(
        get_rotation(&mut persistence, class_id)
            .unwrap()
            .assignments
            .len(),
        2
    );
}

#[test]
fn test_misaligned_rotation_is_rejected_and_store_unchanged() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let dispatcher = RecordingDispatcher::default();

    let valid = rotation_request(&["T1"], vec![group(1, &[Some(t1)])], Vec::new());
    replace_rotation(&mut persistence, class_id, &valid, &dispatcher, BASE_URL).unwrap();

    let misaligned = rotation_request(
        &["T1", "T2"],
        Vec::new(),
        vec![group(1, &[Some(t1)])],
    );
    let err = replace_rotation(&mut persistence, class_id, &misaligned, &dispatcher, BASE_URL)
        .unwrap_err();

    assert_eq!(err.reason_code(), "validation_error");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "pm_rotation"));
    assert_eq!(
        get_rotation(&mut persistence, class_id)
            .unwrap()
            .assignments
            .len(),
        1
    );
}

#[test]
fn test_duplicate_turn_ids_are_rejected() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(
        &["T1", "T1"],
        vec![group(1, &[Some(t1), Some(t1)])],
        Vec::new(),
    );
    let err =
        replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "turns"));
}

#[test]
fn test_unknown_teacher_is_not_found() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5A", 1);
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(&["T1"], vec![group(1, &[Some(999)])], Vec::new());
    let err =
        replace_rotation(&mut persistence, class_id, &request, &dispatcher, BASE_URL).unwrap_err();

    assert_eq!(err.reason_code(), "not_found");
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, id: Some(999), .. } if resource_type == "Teacher"
    ));
    assert!(dispatcher.sent().is_empty());
}

#[test]
fn test_unknown_class_is_not_found() {
    let mut persistence = setup();
    let t1 = seed_teacher(&mut persistence, "Ahl", None);
    let dispatcher = RecordingDispatcher::default();

    let request = rotation_request(&["T1"], vec![group(1, &[Some(t1)])], Vec::new());
    let err = replace_rotation(&mut persistence, 42, &request, &dispatcher, BASE_URL).unwrap_err();
    assert_eq!(err.reason_code(), "not_found");

    let err = get_rotation(&mut persistence, 42).unwrap_err();
    assert_eq!(err.reason_code(), "not_found");
}
