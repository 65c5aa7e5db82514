// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rules for combining two class rosters.
//!
//! The store-side merge runs inside a single transaction; this module
//! holds the pure parts: precondition checks, the capacity limit and
//! the username candidate sequence used to resolve collisions.

use std::collections::HashSet;

use crate::error::DomainError;

/// Maximum number of students in a combined class.
pub const MAX_COMBINED_CLASS_SIZE: usize = 36;

/// Extra username candidates probed beyond the roster size.
pub const USERNAME_PROBE_SLACK: usize = 16;

/// Rejects merging a class with itself.
///
/// # Errors
///
/// Returns `DomainError::SelfMerge` if both ids are equal.
pub const fn validate_distinct_classes(
    first_class_id: i64,
    second_class_id: i64,
) -> Result<(), DomainError> {
    if first_class_id == second_class_id {
        return Err(DomainError::SelfMerge {
            class_id: first_class_id,
        });
    }
    Ok(())
}

/// Checks roster sizes before a merge and returns the combined count.
///
/// # Errors
///
/// Returns an error if:
/// - Both classes are empty
/// - The combined roster exceeds `MAX_COMBINED_CLASS_SIZE`
pub const fn validate_combined_roster(
    first_class_id: i64,
    first_class_count: usize,
    second_class_id: i64,
    second_class_count: usize,
) -> Result<usize, DomainError> {
    if first_class_count == 0 && second_class_count == 0 {
        return Err(DomainError::BothClassesEmpty {
            first_class_id,
            second_class_id,
        });
    }

    let total: usize = first_class_count.saturating_add(second_class_count);
    if total > MAX_COMBINED_CLASS_SIZE {
        return Err(DomainError::CapacityExceeded {
            first_class_count,
            second_class_count,
            limit: MAX_COMBINED_CLASS_SIZE,
        });
    }

    Ok(total)
}

/// Number of candidates probed per student for a roster of `roster_size`.
#[must_use]
pub const fn username_probe_limit(roster_size: usize) -> usize {
    roster_size.saturating_add(USERNAME_PROBE_SLACK)
}

/// Yields the username candidates `base`, `base1`, `base2`, … up to `limit` items.
pub fn username_candidates(base: &str, limit: usize) -> impl Iterator<Item = String> + '_ {
    (0..limit).map(move |suffix| {
        if suffix == 0 {
            base.to_string()
        } else {
            format!("{base}{suffix}")
        }
    })
}

/// Picks the first username candidate that is neither claimed earlier in
/// the same merge nor reported taken by `is_taken`.
///
/// Returns `Ok(None)` when all `probe_limit` candidates are exhausted.
///
/// # Errors
///
/// Propagates the first error returned by `is_taken`.
pub fn resolve_username<E, F>(
    base: &str,
    probe_limit: usize,
    claimed: &HashSet<String>,
    mut is_taken: F,
) -> Result<Option<String>, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    for candidate in username_candidates(base, probe_limit) {
        if claimed.contains(&candidate) {
            continue;
        }
        if !is_taken(&candidate)? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Prefixes a resolved username with the name of the class it came from.
#[must_use]
pub fn provenance_username(original_class_name: &str, resolved: &str) -> String {
    format!("{original_class_name}_{resolved}")
}
