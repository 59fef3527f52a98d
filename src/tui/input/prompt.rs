use crate::model::record::{Field, TaskDraft};
use crate::ops::edit::EditError;
use crate::tui::app::{App, Mode, Prompt};

/// Take the answer to `prompt` and advance the sequence.
/// A rejected answer re-asks the same question.
pub fn answer_prompt(app: &mut App, prompt: Prompt, answer: &str) {
    let next = match prompt {
        Prompt::AddName => Some(Prompt::AddDuration {
            name: answer.to_string(),
        }),
        Prompt::AddDuration { name } => Some(Prompt::AddNotes {
            name,
            duration: answer.to_string(),
        }),
        Prompt::AddNotes { name, duration } => {
            let draft = TaskDraft::new(&name, &duration, answer);
            match app.log.add_task(draft, app.today) {
                Ok(id) => {
                    app.info(format!("added task {}", id));
                    app.checkpoint();
                }
                Err(e) => app.error(e.to_string()),
            }
            None
        }
        Prompt::EditField => match Field::parse_field(answer) {
            Some(Field::Id) => {
                app.error(EditError::ImmutableField(Field::Id).to_string());
                Some(Prompt::EditField)
            }
            Some(field) => Some(Prompt::EditValue { field }),
            None => {
                app.error("choose 1 (date), 2 (name), 3 (duration) or 4 (notes)");
                Some(Prompt::EditField)
            }
        },
        Prompt::EditValue { field } => match app.log.edit_current(field, answer) {
            Ok(()) => Some(Prompt::EditAgain),
            Err(e) => {
                app.error(e.to_string());
                Some(Prompt::EditValue { field })
            }
        },
        Prompt::EditAgain => match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Prompt::EditField),
            "n" | "no" => {
                app.info("task updated");
                app.checkpoint();
                None
            }
            _ => {
                app.error("answer y or n");
                Some(Prompt::EditAgain)
            }
        },
    };
    app.mode = match next {
        Some(prompt) => Mode::Prompt(prompt),
        None => Mode::Command,
    };
}
