//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - add/edit/delete: manage tracked problems
//! - list/due: show problems and their next review
//! - review: interactive review session
//! - stats/overview/history/tags: reporting
//! - export/import: JSON catalog files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recall - practice coding problems with SM-2 spaced repetition
#[derive(Parser, Debug)]
#[command(name = "recall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the database and log file (default: ~/.recall)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Add a new problem to track
    Add {
        /// Problem name
        name: String,

        /// Difficulty from 1 to 5
        #[arg(allow_negative_numbers = true)]
        difficulty: i32,

        /// URL to the problem
        #[arg(short, long)]
        url: Option<String>,

        /// Notes about the problem
        #[arg(short, long)]
        notes: Option<String>,

        /// Comma-separated tags (e.g. array,dp)
        #[arg(short, long)]
        tags: Option<String>,

        /// Starting ease factor (default from config)
        #[arg(long)]
        ease: Option<f64>,
    },

    /// List all tracked problems
    List {
        /// Only problems with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show problems due for review today
    Due,

    /// Start a review session
    ///
    /// With a problem name, review that problem only. Otherwise review
    /// everything due today.
    Review {
        /// Problem name (exact match)
        name: Vec<String>,

        /// Open problem URL in browser
        #[arg(short, long)]
        open: bool,
    },

    /// Edit problem details
    Edit {
        /// Problem ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// New difficulty (1-5)
        #[arg(long, allow_negative_numbers = true)]
        difficulty: Option<i32>,

        /// Comma-separated tags (replaces existing)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a problem
    Delete {
        /// Problem ID
        id: i64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show tracked problem statistics
    Stats,

    /// Show overview of progress and review history
    Overview,

    /// Show the review history of a problem
    History {
        /// Problem name (exact match)
        name: Vec<String>,
    },

    /// List tags and how many problems use them
    Tags,

    /// Export all problems to a JSON file
    Export {
        path: PathBuf,
    },

    /// Import problems from a JSON file
    Import {
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "recall", "add", "Two Sum", "2", "-u", "https://x", "-t", "array,hashmap",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add {
                name,
                difficulty,
                url,
                tags,
                notes,
                ease,
            }) => {
                assert_eq!(name, "Two Sum");
                assert_eq!(difficulty, 2);
                assert_eq!(url.as_deref(), Some("https://x"));
                assert_eq!(tags.as_deref(), Some("array,hashmap"));
                assert!(notes.is_none());
                assert!(ease.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_review_multi_word_name() {
        let cli = Cli::try_parse_from(["recall", "review", "Two", "Sum", "--open"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Review {
                name: vec!["Two".to_string(), "Sum".to_string()],
                open: true,
            })
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["recall", "due", "--data-dir", "/tmp/r", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/r")));
        assert_eq!(cli.command, Some(Commands::Due));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["recall"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_requires_difficulty() {
        assert!(Cli::try_parse_from(["recall", "add", "Two Sum"]).is_err());
    }
}
