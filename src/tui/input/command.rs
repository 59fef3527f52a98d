use crate::ops::cursor::CursorError;
use crate::ops::session::SessionError;
use crate::tui::app::{App, Mode, Prompt};
use crate::tui::command::{Command, parse_command};

/// Parse and run one command line. Failures become a status message; the
/// session always continues.
pub fn execute_line(app: &mut App, line: &str) {
    match parse_command(line) {
        Ok(Some(command)) => execute(app, command),
        Ok(None) => {}
        Err(e) => app.error(e.to_string()),
    }
}

fn execute(app: &mut App, command: Command) {
    match command {
        Command::Add => app.mode = Mode::Prompt(Prompt::AddName),
        Command::Next => {
            if !app.log.next() {
                report_edge(app, "already at the last task");
            }
        }
        Command::Previous => {
            if !app.log.previous() {
                report_edge(app, "already at the first task");
            }
        }
        Command::Edit => match app.log.current() {
            Ok(_) => app.mode = Mode::Prompt(Prompt::EditField),
            Err(e) => app.error(e.to_string()),
        },
        Command::Find { choice, term } => match app.log.find_choice(choice, &term) {
            Ok(0) => app.error(format!("no results for {}", app.log.title())),
            Ok(1) => app.info("1 task found"),
            Ok(n) => app.info(format!("{} tasks found", n)),
            Err(e) => app.error(e.to_string()),
        },
        Command::Select(index) => {
            if let Err(e) = app.log.select(index) {
                app.error(e.to_string());
            }
        }
        Command::All => {
            app.log.show_all();
            app.info(format!("{} tasks", app.log.len()));
        }
        Command::Order { field, descending } => {
            app.log.order_by(field, descending);
            let direction = if descending { "descending" } else { "ascending" };
            app.info(format!("ordered by {} {}", field, direction));
        }
        Command::Help => app.show_help = !app.show_help,
        Command::Quit => app.quit(),
    }
}

/// Movement past either end is a no-op; only an empty view is an error.
fn report_edge(app: &mut App, text: &str) {
    if app.log.is_empty() {
        app.error(SessionError::from(CursorError::EmptyView).to_string());
    } else {
        app.info(text);
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::app::{MessageKind, Mode, Prompt};
    use crate::tui::render::test_helpers::{app_with_tasks, type_line};

    #[test]
    fn next_and_previous_stop_at_edges() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "p");
        assert_eq!(app.log.cursor(), 0);
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Info);

        type_line(&mut app, "n");
        type_line(&mut app, "n");
        type_line(&mut app, "n");
        assert_eq!(app.log.cursor(), 2);
        assert_eq!(
            app.message.as_ref().unwrap().text,
            "already at the last task"
        );
    }

    #[test]
    fn find_reports_count_and_empty_results() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "f2 Standup");
        assert_eq!(app.log.len(), 1);
        assert_eq!(app.message.as_ref().unwrap().text, "1 task found");

        type_line(&mut app, "f2 nobody");
        assert_eq!(app.log.len(), 0);
        let msg = app.message.clone().unwrap();
        assert_eq!(msg.kind, MessageKind::Error);
        assert_eq!(msg.text, "no results for name = \"nobody\"");

        // Navigation and edit on the empty view report instead of crashing
        type_line(&mut app, "n");
        assert_eq!(app.message.as_ref().unwrap().text, "no tasks to show");
        type_line(&mut app, "e");
        assert_eq!(app.mode, Mode::Command);
        assert_eq!(app.message.as_ref().unwrap().text, "no tasks to show");

        type_line(&mut app, "all");
        assert_eq!(app.log.len(), 3);
    }

    #[test]
    fn bad_pattern_and_bad_choice_keep_view() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "f2 Standup");
        type_line(&mut app, "f5 (oops");
        assert_eq!(app.log.len(), 1);
        assert!(
            app.message
                .as_ref()
                .unwrap()
                .text
                .starts_with("invalid pattern")
        );

        type_line(&mut app, "f7 x");
        assert_eq!(app.log.len(), 1);
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn unknown_command_shows_error() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "dance");
        let msg = app.message.clone().unwrap();
        assert_eq!(msg.kind, MessageKind::Error);
        assert!(msg.text.contains("unknown command `dance`"));
        assert!(!app.should_quit);
    }

    #[test]
    fn select_and_order() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "o name asc");
        assert_eq!(app.log.current().unwrap().name, "Code review");
        type_line(&mut app, "s 2");
        assert_eq!(app.log.current().unwrap().name, "Timesheet");
        type_line(&mut app, "s 9");
        assert_eq!(app.log.cursor(), 2);
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn add_and_edit_enter_prompts() {
        let (_tmp, mut app) = app_with_tasks();
        type_line(&mut app, "a");
        assert_eq!(app.mode, Mode::Prompt(Prompt::AddName));
        app.mode = Mode::Command;
        type_line(&mut app, "e");
        assert_eq!(app.mode, Mode::Prompt(Prompt::EditField));
    }
}
