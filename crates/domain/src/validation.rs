// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

const MAX_NAME_LENGTH: usize = 100;
/// Longest username accepted anywhere, merged usernames included.
pub const MAX_USERNAME_LENGTH: usize = 128;

/// Validates a class name.
///
/// Uniqueness is enforced by the store, not here.
///
/// # Errors
///
/// Returns an error if the name is empty, too long, or contains
/// characters that would break provenance usernames (`_` separators
/// are fine, whitespace is not).
pub fn validate_class_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidClassName(String::from(
            "Class name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidClassName(format!(
            "Class name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidClassName(format!(
            "Class name '{name}' cannot contain whitespace"
        )));
    }
    Ok(())
}

/// Validates a first or last name of a student or teacher.
///
/// # Errors
///
/// Returns an error if the name is empty or too long.
pub fn validate_person_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "{field} cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a student username.
///
/// Uniqueness is enforced by the store, not here.
///
/// # Errors
///
/// Returns an error if the username is empty, too long, or contains whitespace.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(DomainError::InvalidUsername(format!(
            "Username cannot exceed {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(format!(
            "Username '{username}' cannot contain whitespace"
        )));
    }
    Ok(())
}
