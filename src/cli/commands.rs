use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "worklog", about = concat!("worklog v", env!("CARGO_PKG_VERSION"), " - a terminal work log"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file (overrides `log.file` from the config)
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (default: ./worklog.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every task, newest first
    List(ListArgs),
    /// Add a task dated today
    Add(AddArgs),
    /// Find tasks by field (1-4) or by regex (5)
    Find(FindArgs),
    /// View the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Time spent in minutes
    pub duration: String,
    /// Notes
    #[arg(default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct FindArgs {
    /// 1 date, 2 name, 3 duration, 4 notes, 5 regex over the whole row
    pub field: usize,
    /// Exact value, or a regex when FIELD is 5
    pub term: String,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Print the absolute path to the recovery log
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_find_with_global_file() {
        let cli = Cli::parse_from(["worklog", "find", "2", "Standup", "--file", "x.csv"]);
        assert_eq!(cli.file, Some(PathBuf::from("x.csv")));
        match cli.command {
            Some(Commands::Find(args)) => {
                assert_eq!(args.field, 2);
                assert_eq!(args.term, "Standup");
                assert!(!args.json);
            }
            _ => panic!("expected find"),
        }
    }

    #[test]
    fn add_notes_default_to_empty() {
        let cli = Cli::parse_from(["worklog", "add", "Lunch", "30"]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name, "Lunch");
                assert_eq!(args.notes, "");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["worklog", "--config", "w.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("w.toml")));
    }
}
