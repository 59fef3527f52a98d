mod command;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::util::unicode;

pub use command::execute_line;
pub use prompt::answer_prompt;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Char('u') if ctrl => app.input.clear(),
        KeyCode::Char('w') if ctrl => {
            let start = unicode::last_word_start(&app.input);
            app.input.truncate(start);
        }
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        KeyCode::Backspace => {
            if let Some(start) = unicode::last_grapheme_start(&app.input) {
                app.input.truncate(start);
            }
        }
        KeyCode::Enter => submit(app),
        KeyCode::Esc => cancel(app),
        KeyCode::Up if app.mode == Mode::Command && app.input.is_empty() => {
            execute_line(app, "p")
        }
        KeyCode::Down if app.mode == Mode::Command && app.input.is_empty() => {
            execute_line(app, "n")
        }
        _ => {}
    }
}

/// Hand the typed line to the command line or the open prompt
fn submit(app: &mut App) {
    let line = std::mem::take(&mut app.input);
    app.message = None;
    match app.mode.clone() {
        Mode::Command => execute_line(app, &line),
        Mode::Prompt(prompt) => answer_prompt(app, prompt, &line),
    }
}

/// Esc: abandon a prompt sequence, or clear the command line
fn cancel(app: &mut App) {
    app.input.clear();
    if let Mode::Prompt(_) = app.mode {
        app.mode = Mode::Command;
        // Edits already answered stay; make them durable like a finished edit
        app.checkpoint();
        app.info("cancelled");
    }
}
