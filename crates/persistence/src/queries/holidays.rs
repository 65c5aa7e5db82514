// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use turnus_domain::{Holiday, parse_iso_date};

use crate::diesel_schema::holidays;
use crate::error::PersistenceError;

/// Diesel Queryable struct for holiday rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = holidays)]
struct HolidayRow {
    holiday_id: i64,
    name: String,
    start_date: String,
    end_date: String,
}

fn parse_stored_date(value: &str) -> Result<Date, PersistenceError> {
    parse_iso_date(value)
        .map_err(|_| PersistenceError::CorruptRecord(format!("Invalid stored date '{value}'")))
}

/// Lists all holidays ordered by start date.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is malformed.
pub fn list_holidays(conn: &mut SqliteConnection) -> Result<Vec<Holiday>, PersistenceError> {
    holidays::table
        .order((holidays::start_date.asc(), holidays::holiday_id.asc()))
        .select(HolidayRow::as_select())
        .load::<HolidayRow>(conn)?
        .into_iter()
        .map(|row| {
            let start_date: Date = parse_stored_date(&row.start_date)?;
            let end_date: Date = parse_stored_date(&row.end_date)?;
            Ok(Holiday::with_id(
                Some(row.holiday_id),
                &row.name,
                start_date,
                end_date,
            )?)
        })
        .collect()
}
