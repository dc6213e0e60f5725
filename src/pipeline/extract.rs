//! pipeline::extract
//!
//! Stage 2: extract localization snapshots from cached archives.
//!
//! # Behavior
//!
//! Every cached archive whose snapshot is not yet persisted gets probed for
//! the known locale layouts. Archives without any localization resource are
//! counted and skipped; that version later diffs as an empty snapshot. A
//! corrupt archive is fatal.

use anyhow::Result;

use super::context::PipelineContext;
use crate::archive;
use crate::ui::output;

/// Counters reported by the extract stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// Snapshots written this run.
    pub extracted: usize,
    /// Archives skipped because the snapshot already existed.
    pub skipped: usize,
    /// Archives without any localization resource.
    pub missing_locale: usize,
}

/// Extract a snapshot from every cached archive that still needs one.
pub fn extract_snapshots(ctx: &PipelineContext) -> Result<ExtractOutcome> {
    let mut outcome = ExtractOutcome::default();

    output::print("Extracting localization tables...", ctx.verbosity);

    for id in ctx.store.archive_ids()? {
        if ctx.store.has_snapshot(&id) {
            outcome.skipped += 1;
            continue;
        }

        match archive::extract_locale(&ctx.store.archive_path(&id))? {
            Some(snapshot) => {
                ctx.store.write_snapshot(&id, &snapshot)?;
                output::debug(
                    format!("{id}: {} entries", snapshot.len()),
                    ctx.verbosity,
                );
                outcome.extracted += 1;
            }
            None => {
                output::warn(format!("{id}: no localization resource"), ctx.verbosity);
                outcome.missing_locale += 1;
            }
        }
    }

    Ok(outcome)
}
