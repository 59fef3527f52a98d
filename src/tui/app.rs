use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::recovery::recovery_log_path;
use crate::io::store_io::load_store;
use crate::model::config::LogConfig;
use crate::model::record::Field;
use crate::ops::session::{SessionError, WorkLog};
use crate::ops::view::Ordering;

use super::input;
use super::render;
use super::theme::Theme;

/// One step of a multi-question prompt sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    AddName,
    AddDuration { name: String },
    AddNotes { name: String, duration: String },
    EditField,
    EditValue { field: Field },
    EditAgain,
}

impl Prompt {
    /// Question shown before the input
    pub fn label(&self) -> String {
        match self {
            Prompt::AddName => "Enter task name: ".into(),
            Prompt::AddDuration { .. } => "Enter time spent in minutes: ".into(),
            Prompt::AddNotes { .. } => "Enter any notes: ".into(),
            Prompt::EditField => {
                "What would you like to edit? (1) date (2) name (3) duration (4) notes: ".into()
            }
            Prompt::EditValue { field } => format!("Enter new {} data: ", field),
            Prompt::EditAgain => "Would you like to change something else? (y,n) ".into(),
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Typing a command
    Command,
    /// Answering a prompt
    Prompt(Prompt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Feedback shown in the status row until the next submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Main application state
pub struct App {
    pub log: WorkLog,
    pub config: LogConfig,
    pub theme: Theme,
    /// Date given to new tasks
    pub today: NaiveDate,
    pub mode: Mode,
    /// Text typed so far at the command line or prompt
    pub input: String,
    pub message: Option<Message>,
    pub show_help: bool,
    pub should_quit: bool,
    /// Set when the final save failed; the process exits non-zero
    pub exit_error: Option<SessionError>,
}

impl App {
    pub fn new(log: WorkLog, config: LogConfig, today: NaiveDate) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            log,
            config,
            theme,
            today,
            mode: Mode::Command,
            input: String::new(),
            message: None,
            show_help: false,
            should_quit: false,
            exit_error: None,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Error,
            text: text.into(),
        });
    }

    /// Persist after a completed change when autosave is on.
    /// Pending view edits are reconciled either way.
    pub fn checkpoint(&mut self) {
        if !self.config.autosave {
            self.log.reconcile();
            return;
        }
        if let Err(e) = self.log.save(&self.config.path) {
            self.error(format!("save failed: {}", e));
        }
    }

    /// Final save, then stop the event loop. A failed save is kept for the exit code.
    pub fn quit(&mut self) {
        if let Err(e) = self.log.save(&self.config.path) {
            self.exit_error = Some(e);
        }
        self.should_quit = true;
    }

    /// Name of the data file for the header
    pub fn file_label(&self) -> String {
        self.config
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.path.display().to_string())
    }
}

/// Load the data file and run the interactive session until quit.
pub fn run(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = load_store(&config.path)?;
    let ordering = Ordering {
        field: config.view.order,
        descending: config.view.descending,
    };
    let log = WorkLog::new(outcome.store, ordering);
    let today = Local::now().date_naive();
    let mut app = App::new(log, config, today);

    if !outcome.skipped.is_empty() {
        let log_path = recovery_log_path(&app.config.path);
        app.error(format!(
            "skipped {} malformed row(s); see {}",
            outcome.skipped.len(),
            log_path.display()
        ));
    } else if outcome.created {
        app.info(format!("created {}", app.config.path.display()));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if let Some(e) = app.exit_error.take() {
        return Err(e.into());
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
