use clap::{Parser, Subcommand};
use notebox_core::SortOrder;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notebox")]
#[command(version = notebox_core::core_version(), about = "Keep short local notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database holding the note collection
    #[arg(long, global = true, env = "NOTEBOX_DB", default_value = "notebox.sqlite3")]
    pub db: PathBuf,

    /// Log level (trace, debug, info, warn, error); only used with --log-dir
    #[arg(long, global = true, env = "NOTEBOX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, global = true, env = "NOTEBOX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a note
    Add {
        /// Note title
        #[arg(long, short = 't', default_value = "")]
        title: String,

        /// Note body
        #[arg(long, short = 'b', default_value = "")]
        body: String,
    },

    /// List notes
    List {
        /// Case-insensitive text to look for in title and body
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Sort order: new, old, az, za (anything else keeps stored order)
        #[arg(long, default_value = "new", value_parser = parse_sort)]
        sort: SortOrder,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a note; prompts for title and body unless given
    Edit {
        /// Note ID (full UUID or unique prefix)
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New body
        #[arg(long, short = 'b')]
        body: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID (full UUID or unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    Ok(SortOrder::parse_lenient(value))
}
