//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cache-dir <path>`: Override the artifact cache root
//! - `--config <path>`: Load configuration from an explicit file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Langtrail - localization history extraction and diffing
#[derive(Parser, Debug)]
#[command(name = "langtrail")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the artifact cache root
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Load configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline: fetch, extract, diff, assets
    #[command(
        name = "generate",
        long_about = "Run the full pipeline.\n\n\
            Downloads every client archive listed by the version manifest, extracts \
            one localization snapshot per version, walks the version lineage to \
            compute per-edge diffs, rebuilds the reverse lineage index, and collects \
            the original translation files.\n\n\
            Every stage skips artifacts that already exist, so an interrupted run \
            resumes where it stopped."
    )]
    Generate,

    /// Download client archives listed by the manifest
    Fetch,

    /// Extract localization snapshots from cached archives
    Extract,

    /// Walk the lineage and compute per-edge diffs
    #[command(
        name = "diff",
        long_about = "Walk the version lineage and compute diffs.\n\n\
            Starts at the newest manifest version, follows declared predecessors \
            (with the built-in corrections for known-broken links) down to the root, \
            then adds the manually declared branch edges. One delta file is written \
            per edge; existing delta files are never recomputed. The reverse lineage \
            index is rebuilt at the end."
    )]
    Diff,

    /// Collect original translation files per version
    Assets,

    /// Print the lineage chain without computing diffs
    Lineage,

    /// Diff two snapshot files from disk
    #[command(
        name = "compare",
        long_about = "Diff two snapshot files from disk.\n\n\
            Reads two flat key-to-value JSON files and prints the structured delta \
            (removed/changed/added/moved) to stdout. The first file is treated as \
            the newer snapshot."
    )]
    Compare {
        /// The newer snapshot file
        current: PathBuf,
        /// The older snapshot file
        predecessor: PathBuf,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shells supported by the completion command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compare_takes_two_paths() {
        let cli = Cli::try_parse_from(["langtrail", "compare", "a.json", "b.json"]).unwrap();
        match cli.command {
            Command::Compare {
                current,
                predecessor,
            } => {
                assert_eq!(current, PathBuf::from("a.json"));
                assert_eq!(predecessor, PathBuf::from("b.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from(["langtrail", "diff", "--quiet", "--cache-dir", "/tmp/c"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
    }
}
