use std::fs;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store_io::load_store;
use crate::model::config::LogConfig;
use crate::model::record::parse_date;
use crate::ops::session::WorkLog;
use crate::ops::view::Ordering;
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

pub const SAMPLE_LOG: &str = "\
id,date,name,duration,notes
1,01/02/2024,Standup,15,daily
2,01/03/2024,Code review,45,\"PR 12, PR 13\"
3,01/01/2024,Timesheet,30,
";

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over a temp `log.csv` holding three tasks, with today = 03/01/2024.
/// Default ordering puts ids in the order 2, 1, 3.
pub fn app_with_tasks() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("log.csv");
    fs::write(&path, SAMPLE_LOG).unwrap();

    let outcome = load_store(&path).unwrap();
    assert!(outcome.skipped.is_empty());
    let log = WorkLog::new(outcome.store, Ordering::default());
    let today = parse_date("03/01/2024").unwrap();
    let app = App::new(log, LogConfig::with_path(path), today);
    (tmp, app)
}

/// Type `line` one key at a time, then press Enter
pub fn type_line(app: &mut App, line: &str) {
    for c in line.chars() {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    handle_key(app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
}
