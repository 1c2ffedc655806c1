//! Input validation for the form layer. Store operations assume
//! pre-validated input and do not re-validate, so the UI is expected to run
//! these checks before submitting.

use crate::day::Day;
use chrono::NaiveTime;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Times must be zero-padded `HH:MM` so the store's lexicographic ordering
/// matches chronological ordering.
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    if value.len() != 5 {
        return Err(ValidationError::new(format!(
            "time '{value}' must use the HH:MM format"
        )));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        ValidationError::new(format!("time '{value}' must use the HH:MM format"))
    })?;
    Ok(())
}

pub fn validate_time_slot(start_time: &str, end_time: &str) -> Result<(), ValidationError> {
    validate_time(start_time)?;
    validate_time(end_time)?;
    if start_time >= end_time {
        return Err(ValidationError::new(format!(
            "time slot must start before it ends ({start_time} >= {end_time})"
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name must not be blank"));
    }
    Ok(())
}

pub fn validate_days(days: &[Day]) -> Result<(), ValidationError> {
    if days.is_empty() {
        return Err(ValidationError::new("at least one day must be selected"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_padded_times() {
        assert!(validate_time("08:00").is_ok());
        assert!(validate_time("23:59").is_ok());
    }

    #[test]
    fn rejects_unpadded_and_malformed_times() {
        assert!(validate_time("8:00").is_err());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("08:60").is_err());
        assert!(validate_time("0800").is_err());
        assert!(validate_time("").is_err());
    }

    #[test]
    fn slot_must_start_before_it_ends() {
        assert!(validate_time_slot("08:00", "08:45").is_ok());
        assert!(validate_time_slot("08:45", "08:00").is_err());
        assert!(validate_time_slot("08:00", "08:00").is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_name("Math").is_ok());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn empty_day_sets_are_rejected() {
        assert!(validate_days(&[Day::Monday]).is_ok());
        assert!(validate_days(&[]).is_err());
    }
}
