// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation plans.
//!
//! A rotation plan is the complete desired assignment of teachers to
//! groups for one class across all turns and both periods. Persisting a
//! plan replaces whatever was stored before; plans are never applied as
//! incremental diffs.
//!
//! ## Invariants
//!
//! - Turn ids within a plan are unique
//! - Each group appears at most once per period
//! - Every group rotation carries exactly one entry per turn
//! - At most one assignment exists per `(group, turn, period)`
//! - A `None` entry means "no teacher this turn" and produces no assignment

use crate::error::DomainError;
use crate::types::{Period, TurnId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// The per-turn teacher choices of one group within one period.
///
/// `turns[i]` applies to the i-th turn of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRotation {
    /// The student group.
    pub group_id: i32,
    /// Teacher per turn, `None` for unassigned.
    pub turns: Vec<Option<i64>>,
}

impl GroupRotation {
    /// Creates a group rotation.
    #[must_use]
    pub const fn new(group_id: i32, turns: Vec<Option<i64>>) -> Self {
        Self { group_id, turns }
    }
}

/// A single teacher assignment within a class rotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RotationAssignment {
    /// The period this assignment applies to.
    pub period: Period,
    /// The student group.
    pub group_id: i32,
    /// The turn this assignment applies to.
    pub turn_id: TurnId,
    /// The assigned teacher.
    pub teacher_id: i64,
}

/// The validated full rotation state for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPlan {
    turns: Vec<TurnId>,
    assignments: Vec<RotationAssignment>,
}

impl RotationPlan {
    /// Returns the turns the plan was built for, in request order.
    #[must_use]
    pub fn turns(&self) -> &[TurnId] {
        &self.turns
    }

    /// Returns the assignments to persist.
    #[must_use]
    pub fn assignments(&self) -> &[RotationAssignment] {
        &self.assignments
    }

    /// Returns the distinct teachers referenced by the plan, ascending.
    #[must_use]
    pub fn teacher_ids(&self) -> Vec<i64> {
        self.assignments
            .iter()
            .map(|assignment| assignment.teacher_id)
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect()
    }

    /// Returns whether the plan clears the rotation entirely.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Validates a rotation request and expands it into assignments.
///
/// # Arguments
///
/// * `turns` - The turn ids, positionally aligned with every group rotation
/// * `am_rotation` - Morning choices per group
/// * `pm_rotation` - Afternoon choices per group
///
/// # Errors
///
/// Returns an error if:
/// - A turn id appears more than once
/// - A group appears twice within the same period
/// - A group rotation does not carry exactly one entry per turn
pub fn build_rotation_plan(
    turns: &[TurnId],
    am_rotation: &[GroupRotation],
    pm_rotation: &[GroupRotation],
) -> Result<RotationPlan, DomainError> {
    let mut seen_turns: HashSet<&TurnId> = HashSet::with_capacity(turns.len());
    for turn_id in turns {
        if !seen_turns.insert(turn_id) {
            return Err(DomainError::DuplicateTurnId(turn_id.value().to_string()));
        }
    }

    let mut assignments: Vec<RotationAssignment> = Vec::new();
    for (period, rotation) in [(Period::Am, am_rotation), (Period::Pm, pm_rotation)] {
        expand_period(period, turns, rotation, &mut assignments)?;
    }

    Ok(RotationPlan {
        turns: turns.to_vec(),
        assignments,
    })
}

fn expand_period(
    period: Period,
    turns: &[TurnId],
    rotation: &[GroupRotation],
    assignments: &mut Vec<RotationAssignment>,
) -> Result<(), DomainError> {
    let mut seen_groups: HashSet<i32> = HashSet::with_capacity(rotation.len());

    for group_rotation in rotation {
        if !seen_groups.insert(group_rotation.group_id) {
            return Err(DomainError::DuplicateGroup {
                period,
                group_id: group_rotation.group_id,
            });
        }
        if group_rotation.turns.len() != turns.len() {
            return Err(DomainError::MisalignedRotation {
                period,
                group_id: group_rotation.group_id,
                expected: turns.len(),
                actual: group_rotation.turns.len(),
            });
        }

        for (turn_id, teacher) in turns.iter().zip(&group_rotation.turns) {
            if let Some(teacher_id) = teacher {
                assignments.push(RotationAssignment {
                    period,
                    group_id: group_rotation.group_id,
                    turn_id: turn_id.clone(),
                    teacher_id: *teacher_id,
                });
            }
        }
    }

    Ok(())
}
