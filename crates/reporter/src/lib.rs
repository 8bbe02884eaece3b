// crates/reporter/src/lib.rs

//! Turns judged todos into text for the user: a pointed three-line block per
//! problem in lint mode, and one numbered line per todo in report mode.

use colored::Colorize;
use judge::Charge;
use std::path::Path;
use todo_marker::{Marker, MarkerError};

/// Where the todo lives, what is wrong with it, and a caret underline of the flag.
///
/// ```text
/// /src/app.rb:45:5 Missing due date annotation
///   # TODO: glimpse infinity
///     ^^^^
/// ```
///
/// Returns `None` when there is no charge.
pub fn report(marker: &Marker<'_>, charge: Option<&Charge>) -> Option<String> {
    let charge = charge?;

    let location = format!(
        "{}:{}:{}",
        marker.path().display().to_string().green(),
        marker.line_number(),
        marker.character_number()
    );
    let problem = charge.to_string().red();

    Some(format!(
        "{} {}\n{}\n{}{}",
        location,
        problem,
        marker.line().trim_end_matches(|c: char| c == '\n' || c == '\r'),
        spaces(marker),
        carets(marker)
    ))
}

/// One line of the report-mode listing, numbered from `position`.
///
/// `1. plan a crime (due 1955-08-02 via #heist) (lib/crime.rb:4:3)`
pub fn list_entry(position: usize, marker: &Marker<'_>, root: &Path) -> Result<String, MarkerError> {
    let due = match (marker.due_date()?, marker.tag()) {
        (Some(due_date), Some(tag)) => format!("due {} via {}", due_date, tag),
        (Some(due_date), None) => format!("due {}", due_date),
        (None, _) => "no due date".to_string(),
    };
    let path = marker.path().strip_prefix(root).unwrap_or(marker.path());

    Ok(format!(
        "{}. {} ({}) ({}:{}:{})",
        position,
        marker.task(),
        due,
        path.display(),
        marker.line_number(),
        marker.character_number()
    ))
}

fn spaces(marker: &Marker<'_>) -> String {
    " ".repeat(marker.character_number().saturating_sub(1))
}

fn carets(marker: &Marker<'_>) -> String {
    "^".repeat(marker.flag().len())
}
