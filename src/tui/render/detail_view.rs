use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::record::Field;
use crate::tui::app::App;
use crate::util::unicode::{single_line, truncate_to_width};

const LABEL_W: usize = 13;

/// Boxed view of every field of the task under the cursor
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            " Current task ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner_width = (area.width as usize).saturating_sub(2);

    let lines: Vec<Line> = match app.log.current() {
        Ok(record) => Field::ALL
            .iter()
            .map(|&field| {
                let label = format!(" {}) {}:", field.index(), capitalize(field.name()));
                let value = single_line(&record.field_text(field));
                let value_width = inner_width.saturating_sub(LABEL_W + 1);
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", label, width = LABEL_W + 1),
                        Style::default().fg(app.theme.dim).bg(bg),
                    ),
                    Span::styled(
                        truncate_to_width(&value, value_width),
                        Style::default().fg(app.theme.text).bg(bg),
                    ),
                ])
            })
            .collect(),
        Err(e) => vec![Line::from(Span::styled(
            format!(" {}", e),
            Style::default().fg(app.theme.dim).bg(bg),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with_tasks, render_to_string, type_line};

    #[test]
    fn shows_all_fields_of_current_task() {
        let (_tmp, app) = app_with_tasks();
        let out = render_to_string(TERM_W, 7, |frame, area| {
            render_detail_view(frame, &app, area);
        });
        assert!(out.contains("Current task"));
        assert!(out.contains("0) Id:       2"));
        assert!(out.contains("1) Date:     01/03/2024"));
        assert!(out.contains("2) Name:     Code review"));
        assert!(out.contains("3) Duration: 45"));
        assert!(out.contains("4) Notes:    PR 12, PR 13"));
    }

    #[test]
    fn multiline_notes_show_break_marks() {
        let (_tmp, mut app) = app_with_tasks();
        app.log
            .edit_current(crate::model::record::Field::Notes, "first\nsecond")
            .unwrap();
        let out = render_to_string(TERM_W, 7, |frame, area| {
            render_detail_view(frame, &app, area);
        });
        assert!(out.contains("4) Notes:    first\u{23ce}second"));
        assert!(!out.lines().any(|l| l.trim() == "second"));
    }

    #[test]
    fn empty_view_says_so() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "f2 nobody");
        let out = render_to_string(TERM_W, 7, |frame, area| {
            render_detail_view(frame, &app, area);
        });
        assert!(out.contains("no tasks to show"));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("duration"), "Duration");
        assert_eq!(capitalize(""), "");
    }
}
