//! End-to-end behavior of a work-log session over a real data file.

use std::fs;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use worklog::io::store_io::load_store;
use worklog::model::record::{Field, TaskDraft, parse_date};
use worklog::model::store::Store;
use worklog::ops::cursor::CursorError;
use worklog::ops::view::Ordering;
use worklog::ops::{SessionError, WorkLog};

fn day(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn three_tasks() -> WorkLog {
    let mut store = Store::new();
    store.append(TaskDraft::new("A", "10", ""), day("01/01/2024")).unwrap();
    store.append(TaskDraft::new("B", "20", ""), day("01/02/2024")).unwrap();
    store.append(TaskDraft::new("C", "30", ""), day("01/03/2024")).unwrap();
    WorkLog::new(store, Ordering::default())
}

fn ids(log: &WorkLog) -> Vec<u32> {
    log.records().map(|r| r.id).collect()
}

#[test]
fn edit_in_filtered_view_survives_widening() {
    let mut log = three_tasks();
    assert_eq!(log.find_choice(2, "A").unwrap(), 1);
    log.edit_current(Field::Name, "X").unwrap();
    log.show_all();

    assert_eq!(log.store().find(1).unwrap().name, "X");
    assert!(log.records().any(|r| r.id == 1 && r.name == "X"));
}

#[test]
fn ids_are_stable_across_edits_filters_and_sorts() {
    let mut log = three_tasks();
    log.order_by(Field::Name, false);
    assert_eq!(ids(&log), vec![1, 2, 3]);
    log.select(1).unwrap();
    log.edit_current(Field::Date, "06/01/2024").unwrap();
    log.find_pattern("^2,").unwrap();
    assert_eq!(ids(&log), vec![2]);
    log.show_all();

    let b = log.store().find(2).unwrap();
    assert_eq!(b.name, "B");
    assert_eq!(b.date_text(), "06/01/2024");
    assert_eq!(ids(&log), vec![1, 2, 3]);

    // Newest first: B moved to the top
    log.order_by(Field::Date, true);
    assert_eq!(ids(&log), vec![2, 3, 1]);
}

#[test]
fn empty_search_gives_empty_view() {
    let mut log = three_tasks();
    assert_eq!(log.find_choice(2, "nobody").unwrap(), 0);
    assert!(log.is_empty());
    assert!(matches!(
        log.current(),
        Err(SessionError::Cursor(CursorError::EmptyView))
    ));
    assert!(!log.next());
    assert!(!log.previous());
}

#[test]
fn descending_date_order_keeps_ties_in_store_order() {
    let mut store = Store::new();
    store.append(TaskDraft::new("one", "1", ""), day("01/01/2024")).unwrap();
    store.append(TaskDraft::new("two", "2", ""), day("01/01/2024")).unwrap();
    store.append(TaskDraft::new("three", "3", ""), day("02/01/2024")).unwrap();
    let log = WorkLog::new(store, Ordering::default());
    assert_eq!(ids(&log), vec![3, 1, 2]);
}

#[test]
fn cursor_stays_in_bounds() {
    let mut log = three_tasks();
    assert!(!log.previous());
    assert_eq!(log.cursor(), 0);
    assert!(log.next());
    assert!(log.next());
    assert!(!log.next());
    assert_eq!(log.cursor(), 2);
}

#[test]
fn add_then_find_then_save() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("log.csv");
    fs::write(
        &path,
        "id,date,name,duration,notes\n1,01/02/2024,Standup,15,daily\n2,01/03/2024,Code review,45,\n",
    )
    .unwrap();

    let outcome = load_store(&path).unwrap();
    let mut log = WorkLog::new(outcome.store, Ordering::default());
    let before = log.store().len();

    let id = log
        .add_task(
            TaskDraft::new("Write report", "45", "draft v1"),
            day("03/01/2024"),
        )
        .unwrap();
    assert_eq!(log.store().len(), before + 1);
    assert_eq!(id as usize, before + 1);
    assert_eq!(log.store().find(id).unwrap().date_text(), "03/01/2024");

    assert_eq!(log.find_choice(2, "Write report").unwrap(), 1);
    assert_eq!(log.current().unwrap().id, id);

    log.save(&path).unwrap();
    let reloaded = load_store(&path).unwrap();
    assert_eq!(reloaded.store.len(), 3);
    assert_eq!(
        fs::read_to_string(&path).unwrap().lines().last().unwrap(),
        "3,03/01/2024,Write report,45,draft v1"
    );
}

#[test]
fn save_to_unwritable_destination_fails() {
    let tmp = TempDir::new().unwrap();
    let mut log = three_tasks();
    let missing_dir = tmp.path().join("no/such/dir/log.csv");
    assert!(matches!(
        log.save(&missing_dir),
        Err(SessionError::Storage(_))
    ));
}
