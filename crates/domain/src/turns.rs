// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouping of generated weeks into turns.
//!
//! A turn is a consecutive block of weeks during which one fixed
//! teacher-to-group mapping applies. Turns are derived from the week
//! sequence on demand and never stored.

use crate::calendar::Week;
use crate::error::DomainError;
use crate::types::TurnId;
use serde::{Deserialize, Serialize};
use time::Date;

/// An ordered, named block of weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    turn_id: TurnId,
    name: String,
    weeks: Vec<Week>,
}

impl Turn {
    /// Creates a turn from an id, a display name and its weeks.
    #[must_use]
    pub const fn new(turn_id: TurnId, name: String, weeks: Vec<Week>) -> Self {
        Self {
            turn_id,
            name,
            weeks,
        }
    }

    /// Returns the stable turn id.
    #[must_use]
    pub const fn turn_id(&self) -> &TurnId {
        &self.turn_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weeks of this turn in calendar order.
    #[must_use]
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Date of the first week, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.weeks.first().map(|week| week.date)
    }

    /// Date of the last week, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.weeks.last().map(|week| week.date)
    }

    /// Number of weeks not flagged as holiday.
    #[must_use]
    pub fn teaching_weeks(&self) -> usize {
        self.weeks.iter().filter(|week| !week.is_holiday).count()
    }
}

/// Partitions a week sequence into consecutive turns.
///
/// Turns are numbered from 1 with ids `T1`, `T2`, … and names
/// `Turnus 1`, `Turnus 2`, …. The last turn may hold fewer weeks.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeeksPerTurn` if `weeks_per_turn` is 0.
pub fn split_into_turns(weeks: &[Week], weeks_per_turn: usize) -> Result<Vec<Turn>, DomainError> {
    if weeks_per_turn == 0 {
        return Err(DomainError::InvalidWeeksPerTurn);
    }

    weeks
        .chunks(weeks_per_turn)
        .enumerate()
        .map(|(index, chunk)| {
            let number: usize = index + 1;
            let turn_id: TurnId = TurnId::new(&format!("T{number}"))?;
            Ok(Turn::new(turn_id, format!("Turnus {number}"), chunk.to_vec()))
        })
        .collect()
}
