//! Form rules applied before anything is written.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::errors::TrackerError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks job dates: literal `YYYY-MM-DD` shape and a real calendar day.
pub struct DateValidator {
    pattern: Regex,
}

impl DateValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Self::compile_pattern()?,
        })
    }

    fn compile_pattern() -> Result<Regex> {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").context("Failed to compile date pattern")
    }

    pub fn parse(&self, text: &str) -> Result<NaiveDate, TrackerError> {
        if text.is_empty() {
            return Err(TrackerError::MissingData(
                "Please enter a date for the job (YYYY-MM-DD)".to_string(),
            ));
        }
        if !self.pattern.is_match(text) {
            return Err(TrackerError::InvalidDate(
                "Date must be in YYYY-MM-DD format".to_string(),
            ));
        }
        parse_calendar_date(text)
    }
}

fn parse_calendar_date(text: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidDate(format!("{text} is not a valid calendar date")))
}

pub fn require_client_name(name: &str) -> Result<&str, TrackerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::MissingData(
            "Please enter a client name".to_string(),
        ));
    }
    Ok(trimmed)
}

pub fn require_credentials(username: &str, password: &str) -> Result<(), TrackerError> {
    if username.is_empty() || password.is_empty() {
        return Err(TrackerError::MissingFields(
            "Please enter username and password".to_string(),
        ));
    }
    Ok(())
}

pub fn check_new_password(
    password: &str,
    confirmation: &str,
    min_length: usize,
) -> Result<(), TrackerError> {
    if password != confirmation {
        return Err(TrackerError::PasswordMismatch);
    }
    // Length in UTF-16 code units, as existing accounts were checked
    if password.encode_utf16().count() < min_length {
        return Err(TrackerError::WeakPassword(min_length));
    }
    Ok(())
}
