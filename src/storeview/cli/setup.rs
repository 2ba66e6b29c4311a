use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "storeview", bin_name = "storeview", version)]
#[command(about = "Inspect and edit localStorage / sessionStorage dumps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage directory holding local.json and session.json
    #[arg(short, long, global = true, env = "STOREVIEW_DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Operate on sessionStorage
    #[arg(short, long, global = true, conflicts_with = "local", help_heading = "Options")]
    pub session: bool,

    /// Operate on localStorage (overrides the configured default store)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub local: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries of the selected store
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only entries containing this text (case-insensitive)
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Only entries of this type (string, number, boolean, object, array, null)
        #[arg(short, long = "type", value_name = "TYPE")]
        type_filter: Option<String>,

        /// Where to look for the search text: all, key or value
        #[arg(short, long)]
        field: Option<String>,
    },

    /// Search entries by key or value
    #[command(display_order = 2)]
    Search {
        term: String,

        /// Only entries of this type
        #[arg(short, long = "type", value_name = "TYPE")]
        type_filter: Option<String>,

        /// Where to look for the search text: all, key or value
        #[arg(short, long)]
        field: Option<String>,
    },

    /// Show one entry in full
    #[command(alias = "v", display_order = 3)]
    Get { key: String },

    /// Copy an entry's value to the clipboard
    #[command(alias = "cp", display_order = 4)]
    Copy { key: String },

    /// Create or overwrite an entry
    #[command(display_order = 10)]
    Set { key: String, value: String },

    /// Edit an entry (opens $EDITOR when no value is given)
    #[command(alias = "e", display_order = 11)]
    Edit {
        key: String,

        /// New value; must stay a valid object/array for structured entries
        value: Option<String>,
    },

    /// Delete an entry
    #[command(alias = "rm", display_order = 12)]
    Delete {
        key: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Remove every entry of the selected store
    #[command(display_order = 13)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write the selected store to <kind>Storage_backup_<date>.json
    #[command(display_order = 20)]
    Export {
        /// Directory to write the backup into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore entries from a backup file ("-" reads stdin)
    #[command(display_order = 21)]
    Import { file: String },

    /// Entry counts and sizes of both stores
    #[command(display_order = 22)]
    Stats,

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., preview-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::parse_from([
            "storeview", "--session", "list", "-q", "tok", "--type", "string", "-f", "key",
        ]);
        assert!(cli.session);
        match cli.command {
            Some(Commands::List {
                search,
                type_filter,
                field,
            }) => {
                assert_eq!(search.as_deref(), Some("tok"));
                assert_eq!(type_filter.as_deref(), Some("string"));
                assert_eq!(field.as_deref(), Some("key"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn session_and_local_conflict() {
        assert!(Cli::try_parse_from(["storeview", "-s", "-l", "list"]).is_err());
    }

    #[test]
    fn edit_value_is_optional() {
        let cli = Cli::parse_from(["storeview", "edit", "cart"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Edit { ref key, value: None }) if key == "cart"
        ));
    }
}
