use std::path::Path;

use chrono::NaiveDate;

use crate::io::store_io::{self, StoreError};
use crate::model::record::{Field, TaskDraft, TaskRecord};
use crate::model::store::{IdsExhausted, Store};

use super::cursor::{Cursor, CursorError};
use super::edit::{EditError, edit_field};
use super::search::{Query, QueryError};
use super::view::{Ordering, View};

/// Any failure of a work-log operation
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Ids(#[from] IdsExhausted),
}

/// The work-log state machine: the canonical store, the active view over it
/// and the cursor into that view.
///
/// Whenever the active view is replaced, records edited in the old view are
/// first written back into the store by id, so narrowing and widening never
/// lose an edit. Saving reconciles the same way before writing.
#[derive(Debug)]
pub struct WorkLog {
    store: Store,
    view: View,
    cursor: Cursor,
}

impl WorkLog {
    /// Start with an unfiltered view in the given order
    pub fn new(store: Store, ordering: Ordering) -> Self {
        let view = View::build(&store, Query::All, ordering);
        WorkLog {
            store,
            view,
            cursor: Cursor::default(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    /// Number of rows in the active view
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Heading for the active view, e.g. `All tasks` or `name = "Standup"`
    pub fn title(&self) -> String {
        self.view.query().to_string()
    }

    /// Records of the active view in display order, with unsaved edits applied
    pub fn records(&self) -> impl Iterator<Item = &TaskRecord> {
        self.view.records(&self.store)
    }

    /// The record under the cursor
    pub fn current(&self) -> Result<&TaskRecord, SessionError> {
        let pos = self.cursor.current(self.view.len())?;
        self.view
            .record(&self.store, pos)
            .ok_or(SessionError::Cursor(CursorError::EmptyView))
    }

    pub fn next(&mut self) -> bool {
        self.cursor.next(self.view.len())
    }

    pub fn previous(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        self.cursor.select(index, self.view.len())?;
        Ok(())
    }

    /// Change one field of the record under the cursor.
    ///
    /// The change lives in the view until the next reconciliation. A rejected
    /// value leaves the record untouched.
    pub fn edit_current(&mut self, field: Field, value: &str) -> Result<(), SessionError> {
        let pos = self.cursor.current(self.view.len())?;
        let mut edited = self
            .view
            .record(&self.store, pos)
            .cloned()
            .ok_or(CursorError::EmptyView)?;
        edit_field(&mut edited, field, value)?;
        if let Some(slot) = self.view.record_mut(&self.store, pos) {
            *slot = edited;
        }
        Ok(())
    }

    /// Append a new record dated `today` and rebuild the active view so the
    /// record shows up if it passes the current filter. Returns its id.
    pub fn add_task(&mut self, draft: TaskDraft, today: NaiveDate) -> Result<u32, SessionError> {
        self.reconcile();
        let id = self.store.append(draft, today)?;
        let query = self.view.query().clone();
        self.replace_view(query, self.view.ordering());
        Ok(id)
    }

    /// Replace the active view with the records matching `query`.
    /// Returns the number of matches; zero leaves an empty view.
    pub fn find(&mut self, query: Query) -> usize {
        self.replace_view(query, self.view.ordering());
        self.view.len()
    }

    /// Search by menu choice: `1..4` exact field match, `5` pattern.
    /// A bad choice or pattern leaves the active view unchanged.
    pub fn find_choice(&mut self, choice: usize, term: &str) -> Result<usize, SessionError> {
        let query = Query::from_choice(choice, term)?;
        Ok(self.find(query))
    }

    pub fn find_pattern(&mut self, pattern: &str) -> Result<usize, SessionError> {
        let query = Query::pattern(pattern)?;
        Ok(self.find(query))
    }

    /// Widen back to every record
    pub fn show_all(&mut self) {
        self.replace_view(Query::All, self.view.ordering());
    }

    /// Re-sort the active view, keeping its filter
    pub fn order_by(&mut self, field: Field, descending: bool) {
        let query = self.view.query().clone();
        self.replace_view(query, Ordering { field, descending });
    }

    /// Write records edited in the active view back into the store.
    /// Returns how many records were updated.
    pub fn reconcile(&mut self) -> usize {
        let mut updated = 0;
        for record in self.view.take_edits() {
            if self.store.write_back(record) {
                updated += 1;
            }
        }
        updated
    }

    /// Reconcile, then overwrite the data file with the full store
    pub fn save(&mut self, path: &Path) -> Result<(), SessionError> {
        self.reconcile();
        store_io::write_store(path, &self.store)?;
        Ok(())
    }

    fn replace_view(&mut self, query: Query, ordering: Ordering) {
        self.reconcile();
        self.view = View::build(&self.store, query, ordering);
        self.cursor.reset();
    }
}
