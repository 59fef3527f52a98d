use crate::model::record::Field;

/// A command typed at the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Next,
    Previous,
    Edit,
    /// `f<choice> <term>`: choice 1..4 is a field, 5 a pattern
    Find { choice: usize, term: String },
    Select(usize),
    All,
    Order { field: Field, descending: bool },
    Help,
    Quit,
}

/// Error type for command parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (? for help)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

const FIND_USAGE: &str = "f<1-5> <term>  (1 date, 2 name, 3 duration, 4 notes, 5 pattern)";
const SELECT_USAGE: &str = "s <number>";
const ORDER_USAGE: &str = "o <id|date|name|duration|notes> [asc|desc]";

/// Parse a command line. Blank input is `Ok(None)`.
///
/// The command word is case-insensitive; search terms are kept exactly as
/// typed apart from surrounding whitespace.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let word = word.to_lowercase();

    let command = match word.as_str() {
        "a" | "add" => Command::Add,
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "e" | "edit" => Command::Edit,
        "all" | "r" | "reset" => Command::All,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        "s" | "select" => {
            let index = parse_number(rest).ok_or(CommandError::Usage(SELECT_USAGE))?;
            Command::Select(index)
        }
        "o" | "order" => parse_order(rest)?,
        "f" | "find" => {
            let (choice, term) = match rest.split_once(char::is_whitespace) {
                Some((c, t)) => (c, t.trim()),
                None => (rest, ""),
            };
            find_command(choice, term)?
        }
        _ => match word.strip_prefix('f') {
            Some(choice) if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) => {
                find_command(choice, rest)?
            }
            _ => return Err(CommandError::Unknown(word)),
        },
    };
    Ok(Some(command))
}

fn parse_number(s: &str) -> Option<usize> {
    s.trim().parse().ok()
}

fn find_command(choice: &str, term: &str) -> Result<Command, CommandError> {
    let choice = parse_number(choice).ok_or(CommandError::Usage(FIND_USAGE))?;
    Ok(Command::Find {
        choice,
        term: term.to_string(),
    })
}

fn parse_order(rest: &str) -> Result<Command, CommandError> {
    let mut parts = rest.split_whitespace();
    let field = parts
        .next()
        .and_then(Field::parse_field)
        .ok_or(CommandError::Usage(ORDER_USAGE))?;
    let descending = match parts.next().map(str::to_lowercase).as_deref() {
        None | Some("desc") => true,
        Some("asc") => false,
        Some(_) => return Err(CommandError::Usage(ORDER_USAGE)),
    };
    if parts.next().is_some() {
        return Err(CommandError::Usage(ORDER_USAGE));
    }
    Ok(Command::Order { field, descending })
}
