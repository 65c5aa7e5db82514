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

mod calendar;
mod error;
mod merge;
mod rotation;
mod turns;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{Week, generate_weeks, weekday_from_index};
pub use error::DomainError;
pub use merge::{
    MAX_COMBINED_CLASS_SIZE, USERNAME_PROBE_SLACK, provenance_username, resolve_username,
    username_candidates, username_probe_limit, validate_combined_roster, validate_distinct_classes,
};
pub use rotation::{GroupRotation, RotationAssignment, RotationPlan, build_rotation_plan};
pub use turns::{Turn, split_into_turns};
pub use types::{Holiday, Period, TurnId, parse_iso_date};
pub use validation::{
    MAX_USERNAME_LENGTH, validate_class_name, validate_person_name, validate_username,
};
