// crates/todo_marker/src/pattern.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::FLAG;

/// `TODO`, an optional `(YYYY-MM-DD)` or `(#tag)`, a colon, the task, and
/// optionally the same kind of annotation at the end of the line.
static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let date = r"\([0-9]{4}-[0-9]{2}-[0-9]{2}\)";
    let tag = r"#\w+";
    let pattern = format!(
        r"(?P<flag>{flag})(?:(?P<lead_date>{date})|\((?P<lead_tag>{tag})\))?:(?P<task>.*?)(?:\s*(?:(?P<date>{date})|\((?P<tag>{tag})\)))?\s*$",
        flag = regex::escape(FLAG),
        date = date,
        tag = tag,
    );
    Regex::new(&pattern).expect("valid todo marker pattern")
});

/// The parenthesized suffix that tells us when a todo is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The raw `(YYYY-MM-DD)` text, parentheses included.
    Date(String),
    /// The tag name, `#` sigil included.
    Tag(String),
}

/// Everything the recognizer pulls out of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recognized {
    /// Characters (not bytes) before the flag.
    pub offset: usize,
    pub flag: String,
    pub task: String,
    pub annotation: Option<Annotation>,
}

pub(crate) fn is_match(line: &str) -> bool {
    MARKER_PATTERN.is_match(line)
}

pub(crate) fn recognize(line: &str) -> Option<Recognized> {
    let caps = MARKER_PATTERN.captures(line)?;
    let flag = caps.name("flag")?;

    Some(Recognized {
        offset: line[..flag.start()].chars().count(),
        flag: flag.as_str().to_string(),
        task: caps
            .name("task")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        annotation: pick_annotation(&caps),
    })
}

/// A date in either position beats a tag; the leading annotation beats the
/// trailing one of the same kind.
fn pick_annotation(caps: &Captures<'_>) -> Option<Annotation> {
    let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    text("lead_date")
        .or_else(|| text("date"))
        .map(Annotation::Date)
        .or_else(|| text("lead_tag").or_else(|| text("tag")).map(Annotation::Tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_todo() {
        let r = recognize("# TODO: get a good night's sleep").unwrap();
        assert_eq!(r.offset, 2);
        assert_eq!(r.flag, "TODO");
        assert_eq!(r.task, "get a good night's sleep");
        assert_eq!(r.annotation, None);
    }

    #[test]
    fn test_leading_date() {
        let r = recognize("# TODO(2015-08-29): solve a crime").unwrap();
        assert_eq!(r.task, "solve a crime");
        assert_eq!(r.annotation, Some(Annotation::Date("(2015-08-29)".into())));
    }

    #[test]
    fn test_leading_tag() {
        let r = recognize("// TODO(#omg): solve a crime").unwrap();
        assert_eq!(r.offset, 3);
        assert_eq!(r.annotation, Some(Annotation::Tag("#omg".into())));
    }

    #[test]
    fn test_trailing_date() {
        let r = recognize("  # TODO: follow your heart (1994-05-11)").unwrap();
        assert_eq!(r.task, "follow your heart");
        assert_eq!(r.annotation, Some(Annotation::Date("(1994-05-11)".into())));
    }

    #[test]
    fn test_trailing_tag_with_trailing_whitespace() {
        let r = recognize("# TODO: ship it (#shipit)  \n").unwrap();
        assert_eq!(r.task, "ship it");
        assert_eq!(r.annotation, Some(Annotation::Tag("#shipit".into())));
    }

    #[test]
    fn test_annotation_in_the_middle_is_task_text() {
        let r = recognize("# TODO: do (2015-01-01) later").unwrap();
        assert_eq!(r.task, "do (2015-01-01) later");
        assert_eq!(r.annotation, None);
    }

    #[test]
    fn test_date_wins_over_tag() {
        let r = recognize("# TODO(#omg): solve a crime (2015-08-29)").unwrap();
        assert_eq!(r.annotation, Some(Annotation::Date("(2015-08-29)".into())));
    }

    #[test]
    fn test_leading_wins_over_trailing() {
        let r = recognize("# TODO(2001-01-01): solve a crime (2015-08-29)").unwrap();
        assert_eq!(r.annotation, Some(Annotation::Date("(2001-01-01)".into())));
        assert_eq!(r.task, "solve a crime");
    }

    #[test]
    fn test_requires_colon() {
        assert!(!is_match("# TODO get a boat"));
        assert!(!is_match("# TODO(2015-08-29) get a boat"));
        assert!(!is_match("hello"));
        assert!(!is_match("# todo: lowercase is not a flag"));
    }

    #[test]
    fn test_offset_counts_characters() {
        let r = recognize("# café TODO: fix accent").unwrap();
        assert_eq!(r.offset, 7);
    }

    #[test]
    fn test_full_width_digits_are_not_a_date() {
        assert!(!is_match("# TODO(２０１５-０８-２９): x"));
        let r = recognize("# TODO: x (２０１５-０８-２９)").unwrap();
        assert_eq!(r.annotation, None);
    }

    #[test]
    fn test_first_qualifying_flag_is_used() {
        let r = recognize("TODO TODO: pick me").unwrap();
        assert_eq!(r.offset, 5);
        assert_eq!(r.task, "pick me");
    }
}
