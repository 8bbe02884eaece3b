// crates/todo_marker/src/lib.rs

//! Recognizes todo comments in source lines and works out when each one is due.
//!
//! A marker looks like `TODO: task`, optionally annotated with a due date
//! (`TODO(2015-08-29): task`) or a tag defined in the project config
//! (`TODO(#shipit): task`). The annotation may also trail the task.

mod pattern;
mod sort;

use due_date::{DueDate, DueDateError};
use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use pattern::Annotation;
pub use sort::{sort_by_due_date, NO_DUE_DATE_SORT_KEY};

/// The keyword developers write to get our attention.
pub const FLAG: &str = "TODO";

/// Tag name (with its `#`) to the date every todo carrying that tag is due.
pub type TagTable = BTreeMap<String, DueDate>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("not even a todo: {0:?}")]
    NotAMarker(String),
    #[error("{0} tag not defined in config file")]
    UndefinedTag(String),
    #[error(transparent)]
    DueDate(#[from] DueDateError),
}

/// One todo comment found in a source file.
#[derive(Debug, Clone)]
pub struct Marker<'a> {
    line: String,
    line_number: usize,
    character_number: usize,
    path: PathBuf,
    flag: String,
    task: String,
    annotation: Option<Annotation>,
    tags: &'a TagTable,
    due_date: OnceCell<Option<DueDate>>,
}

impl<'a> Marker<'a> {
    /// Does this line contain a todo?
    pub fn present_in(line: &str) -> bool {
        pattern::is_match(line)
    }

    /// Builds a marker from a line that is known to contain one.
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        path: impl Into<PathBuf>,
        tags: &'a TagTable,
    ) -> Result<Self, MarkerError> {
        let line = line.into();
        let recognized =
            pattern::recognize(&line).ok_or_else(|| MarkerError::NotAMarker(line.clone()))?;

        Ok(Self {
            character_number: recognized.offset + 1,
            flag: recognized.flag,
            task: recognized.task,
            annotation: recognized.annotation,
            line,
            line_number,
            path: path.into(),
            tags,
            due_date: OnceCell::new(),
        })
    }

    /// Every todo in `content`, lines numbered from 1. Lines without a todo are skipped.
    pub fn within(content: &str, path: &Path, tags: &'a TagTable) -> Vec<Marker<'a>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| Self::present_in(line))
            .filter_map(|(index, line)| Self::new(line, index + 1, path, tags).ok())
            .collect()
    }

    /// Reads `path` and returns every todo in it. Invalid UTF-8 is replaced, not rejected.
    pub fn within_file(path: &Path, tags: &'a TagTable) -> io::Result<Vec<Marker<'a>>> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let markers = Self::within(&content, path, tags);
        log::debug!("{}: {} todo(s)", path.display(), markers.len());
        Ok(markers)
    }

    /// The source line containing the todo.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-indexed line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 1-indexed column, in characters, where the flag starts.
    pub fn character_number(&self) -> usize {
        self.character_number
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// The tag that decides the due date, if the todo was tagged rather than dated.
    pub fn tag(&self) -> Option<&str> {
        match &self.annotation {
            Some(Annotation::Tag(tag)) => Some(tag),
            _ => None,
        }
    }

    pub fn has_tag(&self) -> bool {
        self.tag().is_some()
    }

    /// Was this todo annotated with a date or a tag? Says nothing about whether
    /// the tag is actually defined.
    pub fn is_annotated(&self) -> bool {
        self.annotation.is_some()
    }

    /// When this todo is due, if it says.
    ///
    /// The first successful answer is kept. Failures (a malformed date, a tag
    /// missing from the config) are not, so every call reports them again.
    pub fn due_date(&self) -> Result<Option<DueDate>, MarkerError> {
        self.due_date
            .get_or_try_init(|| self.resolve_due_date())
            .copied()
    }

    fn resolve_due_date(&self) -> Result<Option<DueDate>, MarkerError> {
        match &self.annotation {
            None => Ok(None),
            Some(Annotation::Date(text)) => Ok(Some(DueDate::parse_annotation(text)?)),
            Some(Annotation::Tag(tag)) => self
                .tags
                .get(tag)
                .copied()
                .map(Some)
                .ok_or_else(|| MarkerError::UndefinedTag(tag.clone())),
        }
    }
}
