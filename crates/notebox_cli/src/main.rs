//! `notebox` command-line surface.
//!
//! # Responsibility
//! - Parse arguments and environment into runtime configuration.
//! - Drive `notebox_core`'s controller and print rendered note lists.

mod commands;
mod error;
mod handlers;
mod prompt;

use clap::Parser;
use commands::{Cli, Commands};
use error::{CliError, CliResult};
use log::info;
use notebox_core::db::open_db;
use notebox_core::{default_log_level, init_logging, NoteService, NotesController, SqliteNoteStore};
use std::io;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(level) = unused_log_level(&cli) {
        eprintln!("Warning: --log-level {level} has no effect without --log-dir");
    }
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(CliError::Logging)?;
    }
    info!(
        "event=cli_start module=cli status=ok command={}",
        command_name(&cli.command)
    );

    let conn = open_db(&cli.db)?;
    let store = SqliteNoteStore::try_new(&conn)?;
    let mut controller = NotesController::new(NoteService::new(store));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Add { title, body } => handlers::handle_add(&mut controller, title, body, &mut out),
        Commands::List { search, sort, json } => {
            handlers::handle_list(&mut controller, search, sort, json, &mut out)
        }
        Commands::Edit { id, title, body } => {
            handlers::handle_edit(&mut controller, &id, title, body, &mut input, &mut out)
        }
        Commands::Delete { id, yes } => {
            handlers::handle_delete(&mut controller, &id, yes, &mut input, &mut out)
        }
    }
}

/// Level requested while file logging stays off.
fn unused_log_level(cli: &Cli) -> Option<&str> {
    match cli.log_dir {
        Some(_) => None,
        None => cli.log_level.as_deref(),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::List { .. } => "list",
        Commands::Edit { .. } => "edit",
        Commands::Delete { .. } => "delete",
    }
}

#[cfg(test)]
mod tests {
    use super::unused_log_level;
    use crate::commands::Cli;
    use clap::Parser;

    #[test]
    fn log_level_without_log_dir_is_reported() {
        let cli = Cli::parse_from(["notebox", "--log-level", "debug", "list"]);
        assert_eq!(unused_log_level(&cli), Some("debug"));

        let cli = Cli::parse_from([
            "notebox",
            "--log-level",
            "debug",
            "--log-dir",
            "/tmp/notebox-logs",
            "list",
        ]);
        assert_eq!(unused_log_level(&cli), None);

        let cli = Cli::parse_from(["notebox", "list"]);
        assert_eq!(unused_log_level(&cli), None);
    }
}
