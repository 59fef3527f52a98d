use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::record::format_date;
use crate::tui::app::App;

/// Title line (name, today's date, data file) over a separator
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = Line::from(vec![
        Span::styled(
            " Work Log",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   Today: {}", format_date(app.today)),
            Style::default().fg(app.theme.text).bg(bg),
        ),
        Span::styled(
            format!("   Working on {}", app.file_label()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![title, separator]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
