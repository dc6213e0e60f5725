//! cli::commands
//!
//! Command handlers. Each handler is a synchronous wrapper that builds a
//! tokio runtime and blocks on the matching pipeline stage.

pub mod compare;
pub mod completion;
pub mod lineage_cmd;
pub mod stages;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Generate => stages::generate(ctx),
        Command::Fetch => stages::fetch(ctx),
        Command::Extract => stages::extract(ctx),
        Command::Diff => stages::diff(ctx),
        Command::Assets => stages::assets(ctx),
        Command::Lineage => lineage_cmd::lineage(ctx),
        Command::Compare {
            current,
            predecessor,
        } => compare::compare(&current, &predecessor),
        Command::Completion { shell } => completion::completion(shell),
    }
}
