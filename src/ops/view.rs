use std::collections::HashMap;

use crate::model::record::{Field, TaskRecord};
use crate::model::store::Store;

use super::search::Query;

/// Sort key and direction of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: Field,
    pub descending: bool,
}

impl Default for Ordering {
    /// Most recent first
    fn default() -> Self {
        Ordering {
            field: Field::Date,
            descending: true,
        }
    }
}

/// Indices of every record satisfying `predicate`, in store order.
pub fn filter<F>(store: &Store, predicate: F) -> Vec<usize>
where
    F: Fn(&TaskRecord) -> bool,
{
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| predicate(r))
        .map(|(i, _)| i)
        .collect()
}

/// Stable sort of `rows` by the records' `field`. Ties keep their relative order
/// in either direction.
pub fn order_by(rows: &mut [usize], store: &Store, field: Field, descending: bool) {
    let records = store.records();
    rows.sort_by(|&a, &b| {
        let ord = records[a].compare_by(&records[b], field);
        if descending { ord.reverse() } else { ord }
    });
}

/// A filtered, ordered projection over the store.
///
/// Rows are arena indices. Edits made through the view are kept in an
/// overlay keyed by record id until [`View::take_edits`] hands them back for
/// reconciliation.
#[derive(Debug, Clone)]
pub struct View {
    rows: Vec<usize>,
    query: Query,
    ordering: Ordering,
    edits: HashMap<u32, TaskRecord>,
}

impl View {
    /// Filter the store by `query`, then sort by `ordering`
    pub fn build(store: &Store, query: Query, ordering: Ordering) -> View {
        let mut rows = filter(store, |r| query.matches(r));
        order_by(&mut rows, store, ordering.field, ordering.descending);
        View {
            rows,
            query,
            ordering,
            edits: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Arena index of row `pos`
    pub fn row(&self, pos: usize) -> Option<usize> {
        self.rows.get(pos).copied()
    }

    /// The record shown at row `pos`, including unreconciled edits
    pub fn record<'a>(&'a self, store: &'a Store, pos: usize) -> Option<&'a TaskRecord> {
        let stored = store.get(self.row(pos)?)?;
        Some(self.edits.get(&stored.id).unwrap_or(stored))
    }

    /// Mutable access to the record at row `pos`. The first write copies the
    /// stored record into the overlay.
    pub fn record_mut(&mut self, store: &Store, pos: usize) -> Option<&mut TaskRecord> {
        let stored = store.get(self.row(pos)?)?;
        Some(
            self.edits
                .entry(stored.id)
                .or_insert_with(|| stored.clone()),
        )
    }

    /// Every shown record in view order
    pub fn records<'a>(&'a self, store: &'a Store) -> impl Iterator<Item = &'a TaskRecord> + 'a {
        (0..self.rows.len()).filter_map(move |pos| self.record(store, pos))
    }

    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Drain the edited records, lowest id first
    pub fn take_edits(&mut self) -> Vec<TaskRecord> {
        let mut edited: Vec<TaskRecord> = self.edits.drain().map(|(_, r)| r).collect();
        edited.sort_by_key(|r| r.id);
        edited
    }
}
