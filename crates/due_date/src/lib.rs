// crates/due_date/src/lib.rs

//! When a todo is due, and whether that moment has already passed.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// `YYYY-MM-DD` anywhere in the text, as written in config tag tables.
static BARE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("valid bare date pattern"));

/// `(YYYY-MM-DD)`, as written next to a todo flag.
static ANNOTATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([0-9]{4})-([0-9]{2})-([0-9]{2})\)").expect("valid annotation date pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueDateError {
    #[error("not a properly formatted date: {0:?}")]
    InvalidFormat(String),
}

/// A calendar date by which a todo should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate {
    date: NaiveDate,
}

impl DueDate {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Parses a plain date such as `2015-04-14`.
    pub fn parse_bare(text: &str) -> Result<Self, DueDateError> {
        parse_with(&BARE_PATTERN, text)
    }

    /// Parses a todo annotation such as `(2015-04-14)`.
    pub fn parse_annotation(text: &str) -> Result<Self, DueDateError> {
        parse_with(&ANNOTATION_PATTERN, text)
    }

    pub fn to_date(&self) -> NaiveDate {
        self.date
    }

    /// True when the date is strictly before today's local date.
    /// Evaluated against the clock on every call.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

fn parse_with(pattern: &Regex, text: &str) -> Result<DueDate, DueDateError> {
    let invalid = || DueDateError::InvalidFormat(text.to_string());
    let caps = pattern.captures(text).ok_or_else(invalid)?;

    // ASCII digit groups always parse; chrono rejects impossible dates like month 13.
    let year: i32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let day: u32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(DueDate::new)
        .ok_or_else(invalid)
}
