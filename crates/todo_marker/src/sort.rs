// crates/todo_marker/src/sort.rs

use chrono::NaiveDate;

use crate::{Marker, MarkerError};

/// Where a todo without a due date lands: ahead of everything that has one.
pub const NO_DUE_DATE_SORT_KEY: NaiveDate = NaiveDate::MIN;

impl Marker<'_> {
    /// The date this todo sorts by.
    pub fn sort_key(&self) -> Result<NaiveDate, MarkerError> {
        Ok(self
            .due_date()?
            .map(|due_date| due_date.to_date())
            .unwrap_or(NO_DUE_DATE_SORT_KEY))
    }
}

/// Oldest due date first, undated todos in front. Equal keys keep their order.
///
/// Every due date is resolved before anything moves, so an undefined tag
/// fails the whole sort instead of leaving a half-sorted list.
pub fn sort_by_due_date<'a>(markers: Vec<Marker<'a>>) -> Result<Vec<Marker<'a>>, MarkerError> {
    let keys = markers
        .iter()
        .map(Marker::sort_key)
        .collect::<Result<Vec<_>, _>>()?;

    let mut keyed: Vec<(NaiveDate, Marker<'a>)> = keys.into_iter().zip(markers).collect();
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, marker)| marker).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagTable;

    fn todo<'a>(line: &str, tags: &'a TagTable) -> Marker<'a> {
        Marker::new(line, 1, "/tmp/app.rb", tags).unwrap()
    }

    fn tasks(markers: &[Marker<'_>]) -> Vec<String> {
        markers.iter().map(|m| m.task().to_string()).collect()
    }

    #[test]
    fn test_sorts_older_due_dates_first() {
        let tags = TagTable::new();
        let todos = vec![
            todo("# TODO(1969-04-04): commit a crime", &tags),
            todo("# TODO(1955-08-02): plan a crime", &tags),
        ];
        let sorted = sort_by_due_date(todos).unwrap();
        assert_eq!(tasks(&sorted), vec!["plan a crime", "commit a crime"]);
    }

    #[test]
    fn test_sorts_undated_todos_to_the_front() {
        let tags = TagTable::new();
        let todos = vec![
            todo("# TODO(1969-04-04): commit a crime", &tags),
            todo("# TODO: buy some spray paint", &tags),
            todo("# TODO(1955-08-02): plan a crime", &tags),
        ];
        let sorted = sort_by_due_date(todos).unwrap();
        assert_eq!(
            tasks(&sorted),
            vec!["buy some spray paint", "plan a crime", "commit a crime"]
        );
    }

    #[test]
    fn test_ties_keep_their_order() {
        let tags = TagTable::new();
        let todos = vec![
            todo("# TODO: first", &tags),
            todo("# TODO(2000-01-01): second", &tags),
            todo("# TODO: third", &tags),
            todo("# TODO(2000-01-01): fourth", &tags),
        ];
        let sorted = sort_by_due_date(todos).unwrap();
        assert_eq!(tasks(&sorted), vec!["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_undefined_tag_fails_the_sort() {
        let tags = TagTable::new();
        let todos = vec![
            todo("# TODO: fine", &tags),
            todo("# TODO(#shipit): not fine", &tags),
        ];
        let err = sort_by_due_date(todos).unwrap_err();
        assert_eq!(err, MarkerError::UndefinedTag("#shipit".to_string()));
    }

    #[test]
    fn test_sort_key_sentinel() {
        let tags = TagTable::new();
        assert_eq!(
            todo("# TODO: whenever", &tags).sort_key().unwrap(),
            NO_DUE_DATE_SORT_KEY
        );
    }
}
