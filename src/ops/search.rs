use std::fmt;

use regex::Regex;

use crate::model::record::{Field, TaskRecord};

/// Menu number that selects a pattern search instead of a field
pub const PATTERN_CHOICE: usize = 5;

/// Error type for building a query
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("{0}")]
    Validation(String),
}

/// What the active view is filtered by
#[derive(Debug, Clone)]
pub enum Query {
    /// Every record
    All,
    /// Records whose field text equals `term` exactly (case-sensitive)
    Exact { field: Field, term: String },
    /// Records whose canonical CSV row contains a match of the regex
    Pattern { source: String, regex: Regex },
}

impl Query {
    pub fn exact(field: Field, term: &str) -> Result<Query, QueryError> {
        if field == Field::Id {
            return Err(QueryError::Validation(
                "search by date (1), name (2), duration (3) or notes (4)".into(),
            ));
        }
        Ok(Query::Exact {
            field,
            term: term.to_string(),
        })
    }

    pub fn pattern(source: &str) -> Result<Query, QueryError> {
        let regex = Regex::new(source)?;
        Ok(Query::Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// Build a query from a menu choice: `1..4` pick a field, `5` is a pattern.
    pub fn from_choice(choice: usize, term: &str) -> Result<Query, QueryError> {
        match choice {
            PATTERN_CHOICE => Query::pattern(term),
            1..=4 => match Field::from_index(choice) {
                Some(field) => Query::exact(field, term),
                None => Err(choice_error(choice)),
            },
            _ => Err(choice_error(choice)),
        }
    }

    pub fn matches(&self, record: &TaskRecord) -> bool {
        match self {
            Query::All => true,
            Query::Exact { field, term } => record.field_text(*field) == *term,
            Query::Pattern { regex, .. } => regex.is_match(&record.canonical_row()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Query::All)
    }
}

fn choice_error(choice: usize) -> QueryError {
    QueryError::Validation(format!(
        "unknown search type {}: use 1-4 for a field or 5 for a pattern",
        choice
    ))
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::All => write!(f, "All tasks"),
            Query::Exact { field, term } => write!(f, "{} = \"{}\"", field, term),
            Query::Pattern { source, .. } => write!(f, "/{}/", source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::parse_date;

    fn record() -> TaskRecord {
        TaskRecord {
            id: 12,
            date: parse_date("03/01/2024").unwrap(),
            name: "Write report".into(),
            duration: "45".into(),
            notes: "draft, v1".into(),
        }
    }

    #[test]
    fn exact_match_is_case_sensitive_and_whole_field() {
        let r = record();
        assert!(Query::from_choice(2, "Write report").unwrap().matches(&r));
        assert!(!Query::from_choice(2, "write report").unwrap().matches(&r));
        assert!(!Query::from_choice(2, "Write").unwrap().matches(&r));
        assert!(!Query::from_choice(2, "Write report ").unwrap().matches(&r));
    }

    #[test]
    fn exact_match_on_date_uses_text_form() {
        let r = record();
        assert!(Query::from_choice(1, "03/01/2024").unwrap().matches(&r));
        assert!(!Query::from_choice(1, "2024-03-01").unwrap().matches(&r));
        assert!(Query::from_choice(3, "45").unwrap().matches(&r));
        assert!(Query::from_choice(4, "draft, v1").unwrap().matches(&r));
    }

    #[test]
    fn pattern_matches_whole_row() {
        let r = record();
        assert!(Query::pattern(r"^12,03/01").unwrap().matches(&r));
        // Quoted notes field is part of the row text
        assert!(Query::pattern(r#""draft, v1"$"#).unwrap().matches(&r));
        assert!(Query::pattern("rep.rt").unwrap().matches(&r));
        assert!(!Query::pattern("^13,").unwrap().matches(&r));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Query::from_choice(5, "(unclosed").unwrap_err();
        assert!(matches!(err, QueryError::Pattern(_)));
    }

    #[test]
    fn choice_out_of_range_is_validation_error() {
        assert!(matches!(
            Query::from_choice(0, "1").unwrap_err(),
            QueryError::Validation(_)
        ));
        assert!(matches!(
            Query::from_choice(6, "x").unwrap_err(),
            QueryError::Validation(_)
        ));
    }

    #[test]
    fn display_titles() {
        assert_eq!(Query::All.to_string(), "All tasks");
        assert_eq!(
            Query::from_choice(2, "Standup").unwrap().to_string(),
            "name = \"Standup\""
        );
        assert_eq!(Query::pattern("a+").unwrap().to_string(), "/a+/");
    }
}
