//! cli
//!
//! Command-line interface layer for Langtrail.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT talk to the network or the store directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, loads configuration,
//! and dispatches to the [`crate::pipeline`] stages. Commands are synchronous
//! wrappers that build a tokio runtime and block on one async pipeline call.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::core::config::Config;
use crate::ui::Verbosity;

/// Resolved global flags shared by every command.
pub struct Context {
    /// Loaded user configuration (flag overrides applied).
    pub config: Config,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }

    let ctx = Context {
        config,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}
