use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Textual form of a record date, e.g. `03/01/2024`
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Column names in canonical order, as written to the header row
pub const HEADER: [&str; 5] = ["id", "date", "name", "duration", "notes"];

/// One column of a task record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Date,
    Name,
    Duration,
    Notes,
}

impl Field {
    /// All fields in canonical column order
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Date,
        Field::Name,
        Field::Duration,
        Field::Notes,
    ];

    /// Column name used in the header row
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Date => "date",
            Field::Name => "name",
            Field::Duration => "duration",
            Field::Notes => "notes",
        }
    }

    /// Position in the canonical column order (`id` = 0, `notes` = 4).
    /// Menu choices `1..4` line up with the editable fields.
    pub fn index(self) -> usize {
        match self {
            Field::Id => 0,
            Field::Date => 1,
            Field::Name => 2,
            Field::Duration => 3,
            Field::Notes => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Field> {
        Field::ALL.get(index).copied()
    }

    /// Parse a field from a menu digit (`0`..`4`) or a column name
    pub fn parse_field(s: &str) -> Option<Field> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return Field::from_index(n);
        }
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single work-log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable identifier, never reassigned
    pub id: u32,
    #[serde(with = "date_text")]
    pub date: NaiveDate,
    pub name: String,
    /// Minutes spent; usually a number but free text is kept as typed
    pub duration: String,
    pub notes: String,
}

/// User-supplied values for a new record. The id and date are assigned
/// when it is appended to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub duration: String,
    pub notes: String,
}

impl TaskDraft {
    pub fn new(name: &str, duration: &str, notes: &str) -> Self {
        TaskDraft {
            name: name.trim().to_string(),
            duration: duration.trim().to_string(),
            notes: notes.trim().to_string(),
        }
    }
}

impl TaskRecord {
    pub fn from_draft(id: u32, date: NaiveDate, draft: TaskDraft) -> Self {
        TaskRecord {
            id,
            date,
            name: draft.name,
            duration: draft.duration,
            notes: draft.notes,
        }
    }

    /// Date in its on-disk textual form
    pub fn date_text(&self) -> String {
        format_date(self.date)
    }

    /// Stringified value of a field, as compared by exact-match search
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.to_string(),
            Field::Date => self.date_text(),
            Field::Name => self.name.clone(),
            Field::Duration => self.duration.clone(),
            Field::Notes => self.notes.clone(),
        }
    }

    /// All five values in canonical column order
    pub fn to_row(&self) -> [String; 5] {
        Field::ALL.map(|f| self.field_text(f))
    }

    /// The record's CSV row (quoted where needed, no line terminator).
    /// Pattern search matches against this text.
    pub fn canonical_row(&self) -> String {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        // Writing to a Vec cannot fail; fall back to a plain join if it somehow does.
        let row = self.to_row();
        if writer.write_record(&row).is_err() {
            return row.join(",");
        }
        match writer.into_inner() {
            Ok(bytes) => {
                let mut text = String::from_utf8_lossy(&bytes).into_owned();
                if text.ends_with('\n') {
                    text.pop();
                }
                text
            }
            Err(_) => row.join(","),
        }
    }

    /// Compare two records by one field's natural ordering.
    ///
    /// Ids compare numerically and dates chronologically. Durations compare
    /// numerically when both parse as numbers, otherwise as text. Names and
    /// notes compare lexicographically.
    pub fn compare_by(&self, other: &TaskRecord, field: Field) -> Ordering {
        match field {
            Field::Id => self.id.cmp(&other.id),
            Field::Date => self.date.cmp(&other.date),
            Field::Name => self.name.cmp(&other.name),
            Field::Duration => compare_durations(&self.duration, &other.duration),
            Field::Notes => self.notes.cmp(&other.notes),
        }
    }
}

fn compare_durations(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `MM/DD/YYYY` date. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

mod date_text {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(d)?;
        super::parse_date(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, date: &str, name: &str) -> TaskRecord {
        TaskRecord {
            id,
            date: parse_date(date).unwrap(),
            name: name.into(),
            duration: "30".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn field_parse_accepts_digits_and_names() {
        assert_eq!(Field::parse_field("2"), Some(Field::Name));
        assert_eq!(Field::parse_field(" notes "), Some(Field::Notes));
        assert_eq!(Field::parse_field("Date"), Some(Field::Date));
        assert_eq!(Field::parse_field("0"), Some(Field::Id));
        assert_eq!(Field::parse_field("5"), None);
        assert_eq!(Field::parse_field("title"), None);
    }

    #[test]
    fn header_matches_field_order() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, HEADER);
    }

    #[test]
    fn date_text_is_month_day_year() {
        let r = record(1, "03/01/2024", "x");
        assert_eq!(r.date_text(), "03/01/2024");
        assert_eq!(r.field_text(Field::Date), "03/01/2024");
        assert!(parse_date("2024-03-01").is_none());
    }

    #[test]
    fn canonical_row_quotes_commas_and_quotes() {
        let mut r = record(7, "12/24/2023", "Plan, then build");
        r.notes = "said \"ok\"".into();
        assert_eq!(
            r.canonical_row(),
            "7,12/24/2023,\"Plan, then build\",30,\"said \"\"ok\"\"\""
        );
    }

    #[test]
    fn canonical_row_plain() {
        let r = record(1, "01/02/2024", "Standup");
        assert_eq!(r.canonical_row(), "1,01/02/2024,Standup,30,");
    }

    #[test]
    fn compare_dates_chronologically() {
        // 12/01/2023 sorts before 02/01/2024 even though it is larger as text
        let a = record(1, "12/01/2023", "a");
        let b = record(2, "02/01/2024", "b");
        assert_eq!(a.compare_by(&b, Field::Date), Ordering::Less);
    }

    #[test]
    fn compare_durations_numeric_then_text() {
        let mut a = record(1, "01/01/2024", "a");
        let mut b = record(2, "01/01/2024", "b");
        a.duration = "9".into();
        b.duration = "45".into();
        assert_eq!(a.compare_by(&b, Field::Duration), Ordering::Less);
        a.duration = "about an hour".into();
        assert_eq!(a.compare_by(&b, Field::Duration), Ordering::Greater);
    }

    #[test]
    fn draft_trims_input() {
        let d = TaskDraft::new("  Write report ", "45 ", " draft v1");
        assert_eq!(d.name, "Write report");
        assert_eq!(d.duration, "45");
        assert_eq!(d.notes, "draft v1");
    }

    #[test]
    fn serde_uses_date_text() {
        let r = record(3, "03/01/2024", "x");
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"date\":\"03/01/2024\""));
        let back: TaskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
