// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use turnus_domain::{GroupRotation, Period, RotationPlan, TurnId, build_rotation_plan};

use crate::PersistenceError;
use crate::mutations::rotation::write_rotation;
use crate::tests::{seed_class, seed_teacher, setup};

fn turn_ids(ids: &[&str]) -> Vec<TurnId> {
    ids.iter().map(|id| TurnId::new(id).unwrap()).collect()
}

fn plan(turns: &[&str], am: Vec<GroupRotation>, pm: Vec<GroupRotation>) -> RotationPlan {
    build_rotation_plan(&turn_ids(turns), &am, &pm).unwrap()
}

#[test]
fn test_replace_rotation_stores_plan() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");
    let t2 = seed_teacher(&mut persistence, "Two");

    let plan = plan(
        &["T1", "T2"],
        vec![GroupRotation::new(1, vec![Some(t1), Some(t2)])],
        vec![GroupRotation::new(2, vec![None, Some(t1)])],
    );

    let written = persistence.replace_rotation(class_id, &plan).unwrap();
    assert_eq!(written, 3);

    let stored = persistence.get_rotation(class_id).unwrap();
    assert_eq!(stored, plan.assignments());
    assert_eq!(stored[2].period, Period::Pm);
    assert_eq!(stored[2].turn_id.value(), "T2");
}

#[test]
fn test_replace_rotation_is_idempotent() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");

    let plan = plan(
        &["T1", "T2"],
        vec![GroupRotation::new(1, vec![Some(t1), Some(t1)])],
        vec![],
    );

    persistence.replace_rotation(class_id, &plan).unwrap();
    let first = persistence.get_rotation(class_id).unwrap();
    persistence.replace_rotation(class_id, &plan).unwrap();
    let second = persistence.get_rotation(class_id).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

#[test]
fn test_replace_rotation_supersedes_previous_rows() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");
    let t2 = seed_teacher(&mut persistence, "Two");

    let wide = plan(
        &["T1", "T2", "T3"],
        vec![
            GroupRotation::new(1, vec![Some(t1), Some(t1), Some(t1)]),
            GroupRotation::new(2, vec![Some(t2), Some(t2), Some(t2)]),
        ],
        vec![GroupRotation::new(1, vec![Some(t2), None, Some(t2)])],
    );
    persistence.replace_rotation(class_id, &wide).unwrap();

    let narrow = plan(
        &["T1"],
        vec![GroupRotation::new(3, vec![Some(t2)])],
        vec![],
    );
    persistence.replace_rotation(class_id, &narrow).unwrap();

    assert_eq!(persistence.get_rotation(class_id).unwrap(), narrow.assignments());
}

#[test]
fn test_empty_plan_clears_rotation() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");

    persistence
        .replace_rotation(
            class_id,
            &plan(&["T1"], vec![GroupRotation::new(1, vec![Some(t1)])], vec![]),
        )
        .unwrap();

    let cleared = plan(&["T1"], vec![GroupRotation::new(1, vec![None])], vec![]);
    assert_eq!(persistence.replace_rotation(class_id, &cleared).unwrap(), 0);
    assert!(persistence.get_rotation(class_id).unwrap().is_empty());
}

#[test]
fn test_replace_rotation_leaves_other_classes_alone() {
    let mut persistence = setup();
    let class_a = seed_class(&mut persistence, "5a", &[]);
    let class_b = seed_class(&mut persistence, "5b", &[]);
    let t1 = seed_teacher(&mut persistence, "One");

    let plan = plan(&["T1"], vec![GroupRotation::new(1, vec![Some(t1)])], vec![]);
    persistence.replace_rotation(class_a, &plan).unwrap();
    persistence.replace_rotation(class_b, &plan).unwrap();

    let cleared = self::plan(&["T1"], vec![], vec![]);
    persistence.replace_rotation(class_a, &cleared).unwrap();

    assert!(persistence.get_rotation(class_a).unwrap().is_empty());
    assert_eq!(persistence.get_rotation(class_b).unwrap().len(), 1);
}

#[test]
fn test_unknown_teacher_keeps_previous_rotation() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");

    let original = plan(&["T1"], vec![GroupRotation::new(1, vec![Some(t1)])], vec![]);
    persistence.replace_rotation(class_id, &original).unwrap();

    let invalid = plan(
        &["T1"],
        vec![GroupRotation::new(1, vec![Some(t1)])],
        vec![GroupRotation::new(1, vec![Some(999)])],
    );
    assert_eq!(
        persistence.replace_rotation(class_id, &invalid),
        Err(PersistenceError::TeacherNotFound(999))
    );
    assert_eq!(persistence.get_rotation(class_id).unwrap(), original.assignments());
}

#[test]
fn test_replace_rotation_for_missing_class() {
    let mut persistence = setup();
    let plan = plan(&["T1"], vec![], vec![]);
    assert_eq!(
        persistence.replace_rotation(77, &plan),
        Err(PersistenceError::ClassNotFound(77))
    );
    assert_eq!(
        persistence.get_rotation(77),
        Err(PersistenceError::ClassNotFound(77))
    );
}

#[test]
fn test_failed_insert_rolls_back_delete() {
    let mut persistence = setup();
    let class_id = seed_class(&mut persistence, "5a", &[]);
    let t1 = seed_teacher(&mut persistence, "One");

    let original = plan(
        &["T1", "T2"],
        vec![GroupRotation::new(1, vec![Some(t1), Some(t1)])],
        vec![],
    );
    persistence.replace_rotation(class_id, &original).unwrap();

    // Bypasses the teacher pre-check so the insert hits the foreign key.
    let dangling = plan(&["T1"], vec![GroupRotation::new(1, vec![Some(12345)])], vec![]);
    let result: Result<usize, PersistenceError> = persistence
        .conn
        .immediate_transaction(|conn| write_rotation(conn, class_id, &dangling));
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));

    assert_eq!(persistence.get_rotation(class_id).unwrap(), original.assignments());
}
