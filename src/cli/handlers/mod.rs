use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery::{read_recovery_entries, recovery_log_path};
use crate::io::store_io::load_store;
use crate::model::config::LogConfig;
use crate::model::record::TaskDraft;
use crate::ops::session::WorkLog;
use crate::ops::view::Ordering;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List(args) => cmd_list(args, config),
        Commands::Add(args) => cmd_add(args, config),
        Commands::Find(args) => cmd_find(args, config),
        Commands::Recovery(args) => cmd_recovery(args, config),
    }
}

/// Load the data file into a session with the configured ordering.
/// Skipped rows are warned about on stderr.
fn open_log(config: &LogConfig) -> Result<WorkLog, Box<dyn std::error::Error>> {
    let outcome = load_store(&config.path)?;
    if !outcome.skipped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed row(s); see {}",
            outcome.skipped.len(),
            recovery_log_path(&config.path).display()
        );
    }
    let ordering = Ordering {
        field: config.view.order,
        descending: config.view.descending,
    };
    Ok(WorkLog::new(outcome.store, ordering))
}

fn print_view(log: &WorkLog, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let list = TaskListJson {
            query: log.title(),
            tasks: log.records().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if log.is_empty() {
        println!("no results");
    } else {
        for record in log.records() {
            println!("{}", format_task_line(record));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log = open_log(config)?;
    print_view(&log, args.json)
}

fn cmd_find(args: FindArgs, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut log = open_log(config)?;
    log.find_choice(args.field, &args.term)?;
    print_view(&log, args.json)
}

fn cmd_recovery(args: RecoveryCmd, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(RecoveryAction::Path) = args.action {
        let path = std::path::absolute(recovery_log_path(&config.path))?;
        println!("{}", path.display());
        return Ok(());
    }

    let entries = read_recovery_entries(&config.path, Some(args.limit.unwrap_or(10)));
    if args.json {
        let json: Vec<RecoveryEntryJson> = entries.iter().map(recovery_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if entries.is_empty() {
        println!("no recovery entries");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!();
            }
            for line in format_recovery_entry(entry) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut log = open_log(config)?;
    let draft = TaskDraft::new(&args.name, &args.duration, &args.notes);
    let id = log.add_task(draft, Local::now().date_naive())?;
    log.save(&config.path)?;
    println!("{}", id);
    Ok(())
}
