use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::record::TaskRecord;
use crate::util::unicode::{fit_to_width, single_line};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u32,
    pub date: String,
    pub name: String,
    pub duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Serialize)]
pub struct TaskListJson {
    /// Heading of the view, e.g. `All tasks`
    pub query: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: u32,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

pub fn task_to_json(record: &TaskRecord) -> TaskJson {
    TaskJson {
        id: record.id,
        date: record.date_text(),
        name: record.name.clone(),
        duration: record.duration.clone(),
        notes: record.notes.clone(),
    }
}

pub fn recovery_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry.timestamp.to_rfc3339(),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(record: &TaskRecord) -> String {
    let line = format!(
        "{:>4}  {}  {}  {}  {}",
        record.id,
        record.date_text(),
        fit_to_width(&single_line(&record.name), 24),
        fit_to_width(&single_line(&record.duration), 8),
        single_line(&record.notes)
    );
    line.trim_end().to_string()
}

/// Format one recovery entry: header line, fields, then the indented body
pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for body_line in entry.body.lines() {
        lines.push(format!("    {}", body_line));
    }
    lines
}
