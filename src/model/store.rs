use std::collections::HashSet;

use chrono::NaiveDate;

use super::record::{TaskDraft, TaskRecord};

/// Every id from 1 to `u32::MAX` is taken
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no task id left to assign")]
pub struct IdsExhausted;

/// Line terminator of the data file, kept so a save writes what was loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// The canonical, ordered collection of every record.
///
/// Records live in a growable arena; views refer to them by index. Order is
/// append order and matches the row order of the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<TaskRecord>,
    line_ending: LineEnding,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Build a store from records already in canonical order
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        Store {
            records,
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaskRecord> {
        self.records.get(index)
    }

    /// Arena index of the record with this id
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn find(&self, id: u32) -> Option<&TaskRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The id the next appended record receives: `len + 1`, or one past the
    /// highest id when that would collide with an existing record. When the
    /// highest id is `u32::MAX` the lowest unused id is taken instead.
    pub fn next_id(&self) -> Option<u32> {
        let count_based = u32::try_from(self.records.len())
            .ok()
            .and_then(|n| n.checked_add(1));
        if let Some(id) = count_based
            && self.find(id).is_none()
        {
            return Some(id);
        }
        let max = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        if let Some(id) = max.checked_add(1) {
            return Some(id);
        }
        let used: HashSet<u32> = self.records.iter().map(|r| r.id).collect();
        (1..=u32::MAX).find(|id| !used.contains(id))
    }

    /// Append a new record dated `today` and return its id
    pub fn append(&mut self, draft: TaskDraft, today: NaiveDate) -> Result<u32, IdsExhausted> {
        let id = self.next_id().ok_or(IdsExhausted)?;
        self.records.push(TaskRecord::from_draft(id, today, draft));
        Ok(id)
    }

    /// Overwrite the stored record that shares `record.id`.
    /// Returns false when no record has that id.
    pub fn write_back(&mut self, record: TaskRecord) -> bool {
        match self.position_of(record.id) {
            Some(pos) => {
                self.records[pos] = record;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::parse_date;

    fn day() -> NaiveDate {
        parse_date("03/01/2024").unwrap()
    }

    #[test]
    fn append_assigns_count_plus_one() {
        let mut store = Store::new();
        assert_eq!(store.append(TaskDraft::new("a", "1", ""), day()), Ok(1));
        assert_eq!(store.append(TaskDraft::new("b", "2", ""), day()), Ok(2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].name, "b");
        assert_eq!(store.records()[1].date, day());
    }

    #[test]
    fn next_id_skips_ids_in_use() {
        // Row 2 was skipped at load: len + 1 = 3 is taken, so use max + 1
        let store = Store::from_records(vec![
            TaskRecord::from_draft(1, day(), TaskDraft::new("a", "", "")),
            TaskRecord::from_draft(3, day(), TaskDraft::new("c", "", "")),
        ]);
        assert_eq!(store.next_id(), Some(4));
    }

    #[test]
    fn next_id_at_the_top_of_the_range_takes_a_free_id() {
        let mut store = Store::from_records(vec![
            TaskRecord::from_draft(u32::MAX, day(), TaskDraft::new("big", "", "")),
            TaskRecord::from_draft(3, day(), TaskDraft::new("c", "", "")),
        ]);
        assert_eq!(store.next_id(), Some(1));
        assert_eq!(store.append(TaskDraft::new("new", "1", ""), day()), Ok(1));
        // len + 1 is free again
        assert_eq!(store.append(TaskDraft::new("newer", "1", ""), day()), Ok(4));
        let ids: HashSet<u32> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn write_back_replaces_by_id() {
        let mut store = Store::new();
        store.append(TaskDraft::new("a", "1", ""), day()).unwrap();
        store.append(TaskDraft::new("b", "2", ""), day()).unwrap();

        let mut edited = store.find(2).unwrap().clone();
        edited.name = "renamed".into();
        assert!(store.write_back(edited));
        assert_eq!(store.records()[1].name, "renamed");
        assert_eq!(store.records()[1].id, 2);

        let stray = TaskRecord::from_draft(99, day(), TaskDraft::default());
        assert!(!store.write_back(stray));
        assert_eq!(store.len(), 2);
    }
}
