use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// polyglot - Bundle an image and a text note into a searchable pair
#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(about = "Bundle an image and a text note into a named, searchable file pair", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Custom storage root (default: $POLYGLOT_HOME or ~/polyglot_files)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the storage root and an empty index
    Init,
    /// Save an image and a note as a pair
    Save {
        /// Source image (jpg, jpeg or png)
        image: PathBuf,
        /// Note text
        #[arg(short, long, conflicts_with = "text_file")]
        text: Option<String>,
        /// Read the note text from a file
        #[arg(long)]
        text_file: Option<PathBuf>,
        /// Output directory (default: the storage root)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Pair name (default: the source file stem)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Check whether a file is part of a pair and show its note
    Check {
        path: PathBuf,
    },
    /// Search pair names and notes
    Search {
        query: String,
    },
    /// List indexed pairs whose files still exist
    List,
    /// Delete both files of a pair and its index entry
    Delete {
        path: PathBuf,
    },
    /// Rebuild the index from the pairs in the storage root
    Rebuild,
    /// Open a file in the platform viewer
    Open {
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_save_with_options() {
        let cli = Cli::parse_from([
            "polyglot", "--base-dir", "/store", "save", "in.png", "-t", "note", "-n", "pic",
        ]);

        assert_eq!(cli.base_dir, Some(PathBuf::from("/store")));
        match cli.command {
            Commands::Save { image, text, out, name, text_file } => {
                assert_eq!(image, PathBuf::from("in.png"));
                assert_eq!(text.as_deref(), Some("note"));
                assert_eq!(name.as_deref(), Some("pic"));
                assert!(out.is_none());
                assert!(text_file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_text_and_text_file_conflict() {
        let result = Cli::try_parse_from([
            "polyglot", "save", "in.png", "--text", "a", "--text-file", "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["polyglot", "search", "cat", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Search { ref query } if query == "cat"));
    }
}
