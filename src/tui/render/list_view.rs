use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::record::TaskRecord;
use crate::tui::app::App;
use crate::util::unicode::{fit_to_width, single_line, truncate_to_width};

const NUM_W: usize = 7;
const DATE_W: usize = 12;
const NAME_W: usize = 22;
const DURATION_W: usize = 10;

/// Render the active view: a title, a column header and one row per task
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    let title = format!(
        " {}  ({} of {})",
        app.log.title(),
        app.log.len(),
        app.log.store().len()
    );
    lines.push(Line::from(Span::styled(
        truncate_to_width(&title, width),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    if app.log.is_empty() {
        let hint = if app.log.store().is_empty() {
            " No tasks yet. Type `a` to add one."
        } else {
            " No tasks match. Type `all` to show every task."
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    let header = format!(
        "{}{}{}{}{}",
        " ".repeat(NUM_W),
        fit_to_width("Date", DATE_W),
        fit_to_width("Name", NAME_W),
        fit_to_width("Duration", DURATION_W),
        "Notes"
    );
    lines.push(Line::from(Span::styled(
        truncate_to_width(&header, width),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let visible = (area.height as usize).saturating_sub(2).max(1);
    let cursor = app.log.cursor();
    let offset = if cursor >= visible {
        cursor + 1 - visible
    } else {
        0
    };

    for (i, record) in app.log.records().enumerate().skip(offset).take(visible) {
        let is_cursor = i == cursor;
        let style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let marker_style = Style::default().fg(app.theme.highlight).bg(if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        });

        let marker = if is_cursor {
            format!("{:>3}) >>", i)
        } else {
            format!("{:>3})   ", i)
        };
        let row = format_row(record, width.saturating_sub(NUM_W));
        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(row, style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// One task as fixed-width columns, cut to `width` cells
fn format_row(record: &TaskRecord, width: usize) -> String {
    let row = format!(
        "{}{}{}{}",
        fit_to_width(&record.date_text(), DATE_W),
        fit_to_width(&single_line(&record.name), NAME_W - 1) + " ",
        fit_to_width(&single_line(&record.duration), DURATION_W - 1) + " ",
        single_line(&record.notes)
    );
    truncate_to_width(&row, width)
}
