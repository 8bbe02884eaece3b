// crates/judge/src/lib.rs

//! Is a todo worth bothering the user about? Judge it, and charge it with a
//! problem if necessary.

use chrono::{Local, NaiveDate};
use due_date::DueDate;
use std::fmt;
use todo_marker::{Marker, MarkerError};

/// What is wrong with a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    MissingAnnotation,
    Overdue,
    /// Overdue, with the date coming from a config tag rather than the line itself.
    OverdueViaTag(DueDate),
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charge::MissingAnnotation => write!(f, "Missing due date annotation"),
            Charge::Overdue => write!(f, "Overdue due date"),
            Charge::OverdueViaTag(due_date) => write!(f, "Overdue due date {} via tag", due_date),
        }
    }
}

/// The problem with this todo as of today, or `None` if it is fine.
pub fn evaluate(marker: &Marker<'_>) -> Result<Option<Charge>, MarkerError> {
    evaluate_on(marker, Local::now().date_naive())
}

/// Same as [`evaluate`], with "today" supplied by the caller.
pub fn evaluate_on(marker: &Marker<'_>, today: NaiveDate) -> Result<Option<Charge>, MarkerError> {
    if !marker.is_annotated() {
        return Ok(Some(Charge::MissingAnnotation));
    }

    let charge = match marker.due_date()? {
        Some(due_date) if due_date.is_overdue_on(today) => {
            if marker.has_tag() {
                Some(Charge::OverdueViaTag(due_date))
            } else {
                Some(Charge::Overdue)
            }
        }
        _ => None,
    };
    Ok(charge)
}
