use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "omnibus")]
#[command(author, version, about = "Media franchise catalog administration tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every entry of a kind
    List {
        /// Entity kind (character, team, comic, movie, show, creator)
        kind: String,
    },

    /// Show a single entry
    Get {
        kind: String,
        title: String,
    },

    /// Create an entry
    Create {
        kind: String,
        title: String,

        /// Field values as name=value; list fields take comma-separated values
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// Replace an entry's fields
    Update {
        kind: String,
        title: String,

        /// Field values as name=value; omitted fields are reset to empty
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// Delete an entry
    Delete {
        kind: String,
        title: String,
    },

    /// Search a kind by title substring
    Search {
        kind: String,
        term: String,
    },

    /// Import entries from a JSON file
    Import {
        /// JSON file mapping kind names to entry arrays
        file: PathBuf,
    },

    /// Count entries per kind
    Count,
}
