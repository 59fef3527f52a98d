use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, MessageKind, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

const MENU_HINT: &str = " a add  n next  p prev  e edit  f1-f4 find  f5 pattern  all  ? help  q quit";

/// Render the message row and the input row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let message_line = match &app.message {
        Some(message) => {
            let fg = match message.kind {
                MessageKind::Info => app.theme.green,
                MessageKind::Error => app.theme.red,
            };
            Line::from(Span::styled(
                truncate_to_width(&format!(" {}", message.text), width),
                Style::default().fg(fg).bg(bg),
            ))
        }
        None => Line::from(Span::styled(
            truncate_to_width(MENU_HINT, width),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    };

    let (label, hint) = match &app.mode {
        Mode::Command => ("> ".to_string(), "Enter run  ? help"),
        Mode::Prompt(prompt) => (prompt.label(), "Enter answer  Esc cancel"),
    };
    let mut spans = vec![
        Span::styled(label, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            app.input.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
    ];
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph =
        Paragraph::new(vec![message_line, Line::from(spans)]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with_tasks, render_to_string, type_line};

    fn render(app: &App) -> Vec<String> {
        render_to_string(TERM_W, 2, |frame, area| {
            render_status_row(frame, app, area);
        })
        .lines()
        .map(str::to_string)
        .collect()
    }

    #[test]
    fn idle_shows_menu_and_prompt() {
        let (_tmp, app) = app_with_tasks();
        let lines = render(&app);
        assert!(lines[0].starts_with(" a add  n next"));
        assert!(lines[1].starts_with("> \u{258C}"));
        assert!(lines[1].ends_with("Enter run  ? help"));
    }

    #[test]
    fn prompt_label_and_typed_text() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "a");
        app.input.push_str("Lunch");
        let lines = render(&app);
        assert!(lines[1].starts_with("Enter task name: Lunch\u{258C}"));
        assert!(lines[1].ends_with("Esc cancel"));
    }

    #[test]
    fn message_replaces_menu() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "bogus");
        let lines = render(&app);
        assert!(lines[0].contains("unknown command `bogus`"));
    }
}
