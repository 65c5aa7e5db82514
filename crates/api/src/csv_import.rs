// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing and validation for bulk student import.
//!
//! Rows are validated independently. A bad row never prevents the good
//! rows from being imported; it is reported with its row number instead.

use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use turnus_domain::{validate_person_name, validate_username};
use turnus_persistence::NewStudent;

use crate::error::ApiError;

/// File-level CSV errors. Row-level problems are reported per row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvImportError {
    /// The header row could not be read.
    #[error("Failed to read CSV headers: {reason}")]
    UnreadableHeaders { reason: String },

    /// One or more required columns are missing.
    #[error("Missing required headers: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<String> },
}

impl From<CsvImportError> for ApiError {
    fn from(err: CsvImportError) -> Self {
        let rule: &str = match &err {
            CsvImportError::UnreadableHeaders { .. } => "unreadable_csv_headers",
            CsvImportError::MissingHeaders { .. } => "missing_csv_headers",
        };
        Self::InvalidInput {
            field: String::from("csv_content"),
            rule: rule.to_string(),
            message: err.to_string(),
        }
    }
}

/// A parsed CSV row, either ready to insert or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsvRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The username column, if present.
    pub username: Option<String>,
    /// The student to insert, or the reasons the row was rejected.
    pub outcome: Result<NewStudent, Vec<String>>,
}

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["first_name", "last_name", "username"];

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CsvImportError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| (*required).to_string())
        .collect();

    if !missing.is_empty() {
        return Err(CsvImportError::MissingHeaders { missing });
    }

    Ok(header_map)
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<NewStudent, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut required = |name: &str| -> String {
        get_field(name).unwrap_or_else(|| {
            errors.push(format!("{name}: required field is missing or empty"));
            String::new()
        })
    };

    let first_name: String = required("first_name");
    let last_name: String = required("last_name");
    let username: String = required("username");

    let group_id: Option<i32> = get_field("group_id").and_then(|val| {
        val.parse::<i32>().map_or_else(
            |_| {
                errors.push(format!("group_id: invalid number '{val}'"));
                None
            },
            Some,
        )
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    if let Err(e) = validate_person_name("First name", &first_name) {
        errors.push(format!("first_name: {e}"));
    }
    if let Err(e) = validate_person_name("Last name", &last_name) {
        errors.push(format!("last_name: {e}"));
    }
    if let Err(e) = validate_username(&username) {
        errors.push(format!("username: {e}"));
    }

    if errors.is_empty() {
        Ok(NewStudent {
            first_name,
            last_name,
            username,
            group_id,
        })
    } else {
        Err(errors)
    }
}

/// Parses and validates CSV roster content without touching the store.
///
/// Expected columns: `first_name`, `last_name`, `username` and the
/// optional `group_id`. Header matching ignores case and surrounding
/// whitespace.
///
/// # Errors
///
/// Returns an error if the header row is unreadable or a required column
/// is missing.
pub fn parse_student_csv(csv_content: &str) -> Result<Vec<ParsedCsvRow>, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| CsvImportError::UnreadableHeaders {
            reason: e.to_string(),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<ParsedCsvRow> = Vec::new();
    let mut seen_usernames: HashSet<String> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match result {
            Ok(rec) => rec,
            Err(e) => {
                rows.push(ParsedCsvRow {
                    row_number,
                    username: None,
                    outcome: Err(vec![format!("CSV parse error: {e}")]),
                });
                continue;
            }
        };

        let username: Option<String> = header_map
            .get("username")
            .and_then(|&i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut outcome: Result<NewStudent, Vec<String>> = parse_row(&record, &header_map);
        if let Some(name) = &username
            && !seen_usernames.insert(name.clone())
        {
            let duplicate: String =
                format!("username: duplicate within CSV - '{name}' appears multiple times");
            outcome = match outcome {
                Ok(_) => Err(vec![duplicate]),
                Err(mut errors) => {
                    errors.push(duplicate);
                    Err(errors)
                }
            };
        }

        rows.push(ParsedCsvRow {
            row_number,
            username,
            outcome,
        });
    }

    Ok(rows)
}
