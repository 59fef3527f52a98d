use clap::Parser;
use worklog::cli::commands::Cli;
use worklog::cli::handlers;
use worklog::io::config_io::resolve_config;

fn main() {
    let cli = Cli::parse();

    let config = std::env::current_dir()
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|cwd| {
            resolve_config(&cwd, cli.config.as_deref(), cli.file.as_deref())
                .map_err(Box::<dyn std::error::Error>::from)
        });
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch TUI
        None => worklog::tui::run(config),
        Some(command) => handlers::dispatch(command, &config),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
