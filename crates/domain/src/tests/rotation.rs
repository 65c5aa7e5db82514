// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, GroupRotation, Period, RotationPlan, TurnId, build_rotation_plan};

fn turns(ids: &[&str]) -> Vec<TurnId> {
    ids.iter().map(|id| TurnId::new(id).unwrap()).collect()
}

#[test]
fn test_plan_skips_unassigned_entries() {
    let turn_ids = turns(&["T1", "T2", "T3"]);
    let am = vec![
        GroupRotation::new(1, vec![Some(10), None, Some(11)]),
        GroupRotation::new(2, vec![None, None, None]),
    ];
    let pm = vec![GroupRotation::new(1, vec![Some(12), Some(12), None])];

    let plan: RotationPlan = build_rotation_plan(&turn_ids, &am, &pm).unwrap();

    assert_eq!(plan.assignments().len(), 4);
    let am_count = plan
        .assignments()
        .iter()
        .filter(|a| a.period == Period::Am)
        .count();
    assert_eq!(am_count, 2);
    assert!(
        plan.assignments()
            .iter()
            .all(|a| a.group_id != 2),
        "group 2 has no teacher in any turn"
    );
    assert_eq!(plan.teacher_ids(), vec![10, 11, 12]);
}

#[test]
fn test_plan_maps_entries_to_turns_positionally() {
    let turn_ids = turns(&["T1", "T2"]);
    let am = vec![GroupRotation::new(3, vec![None, Some(7)])];

    let plan = build_rotation_plan(&turn_ids, &am, &[]).unwrap();

    assert_eq!(plan.assignments().len(), 1);
    let assignment = &plan.assignments()[0];
    assert_eq!(assignment.turn_id.value(), "T2");
    assert_eq!(assignment.group_id, 3);
    assert_eq!(assignment.teacher_id, 7);
    assert_eq!(assignment.period, Period::Am);
}

#[test]
fn test_plan_rejects_short_rotation() {
    let turn_ids = turns(&["T1", "T2", "T3"]);
    let pm = vec![GroupRotation::new(4, vec![Some(1), Some(2)])];

    let result = build_rotation_plan(&turn_ids, &[], &pm);

    assert_eq!(
        result,
        Err(DomainError::MisalignedRotation {
            period: Period::Pm,
            group_id: 4,
            expected: 3,
            actual: 2,
        })
    );
}

#[test]
fn test_plan_rejects_long_rotation() {
    let turn_ids = turns(&["T1"]);
    let am = vec![GroupRotation::new(1, vec![Some(1), Some(2)])];

    let result = build_rotation_plan(&turn_ids, &am, &[]);
    assert!(matches!(
        result,
        Err(DomainError::MisalignedRotation { actual: 2, .. })
    ));
}

#[test]
fn test_plan_rejects_duplicate_group_in_period() {
    let turn_ids = turns(&["T1"]);
    let am = vec![
        GroupRotation::new(1, vec![Some(1)]),
        GroupRotation::new(1, vec![Some(2)]),
    ];

    let result = build_rotation_plan(&turn_ids, &am, &[]);
    assert_eq!(
        result,
        Err(DomainError::DuplicateGroup {
            period: Period::Am,
            group_id: 1,
        })
    );
}

#[test]
fn test_plan_allows_same_group_in_both_periods() {
    let turn_ids = turns(&["T1"]);
    let am = vec![GroupRotation::new(1, vec![Some(1)])];
    let pm = vec![GroupRotation::new(1, vec![Some(1)])];

    let plan = build_rotation_plan(&turn_ids, &am, &pm).unwrap();
    assert_eq!(plan.assignments().len(), 2);
    assert_eq!(plan.teacher_ids(), vec![1]);
}

#[test]
fn test_plan_rejects_duplicate_turn_ids() {
    let turn_ids = turns(&["T1", "T1"]);
    let result = build_rotation_plan(&turn_ids, &[], &[]);
    assert_eq!(result, Err(DomainError::DuplicateTurnId(String::from("T1"))));
}

#[test]
fn test_empty_plan_is_valid() {
    let plan = build_rotation_plan(&[], &[], &[]).unwrap();
    assert!(plan.is_empty());
    assert!(plan.turns().is_empty());
}
