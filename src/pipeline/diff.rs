//! pipeline::diff
//!
//! Stage 3: walk the lineage, compute per-edge deltas, rebuild the index.
//!
//! # Behavior
//!
//! The walk starts at the newest manifest version and follows declared
//! predecessors (with manual corrections) down to the configured root; the
//! supplementary edges follow. For every edge:
//!
//! - if the delta file already exists it is left untouched (the cache is
//!   keyed by the literal edge, not snapshot content)
//! - otherwise both endpoint snapshots load (absent data loads empty), the
//!   delta is computed and persisted
//! - the edge is recorded into the reverse index either way
//!
//! The reverse index is rebuilt from scratch and written once at the end of
//! the stage. A walk failure aborts before the index write, so a partial
//! index never replaces the previous run's.

use anyhow::{bail, Result};

use super::context::PipelineContext;
use crate::core::diff::diff;
use crate::core::index::ReverseIndex;
use crate::core::lineage;
use crate::core::types::VersionId;
use crate::manifest::VersionManifest;
use crate::ui::output;

/// Counters reported by the diff stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffOutcome {
    /// Deltas computed and written this run.
    pub computed: usize,
    /// Edges whose delta already existed.
    pub cached: usize,
    /// Total edges recorded into the reverse index.
    pub edges: usize,
}

/// The newest version id of a manifest listing.
pub fn newest_version(manifest: &VersionManifest) -> Result<VersionId> {
    let Some(descriptor) = manifest.versions.first() else {
        bail!("manifest lists no versions");
    };
    Ok(VersionId::new(descriptor.version_id())?)
}

/// Walk the lineage and compute every missing delta.
pub async fn build_deltas(
    ctx: &PipelineContext,
    manifest: &VersionManifest,
) -> Result<DiffOutcome> {
    let newest = newest_version(manifest)?;

    output::print(
        format!("Generating diffs from {newest} down to {}...", ctx.root),
        ctx.verbosity,
    );

    let edges = lineage::walk(ctx.source.as_ref(), &newest, &ctx.root).await?;

    let mut index = ReverseIndex::new();
    let mut outcome = DiffOutcome {
        edges: edges.len(),
        ..DiffOutcome::default()
    };

    for edge in &edges {
        output::debug(edge, ctx.verbosity);

        if ctx.store.has_delta(edge) {
            outcome.cached += 1;
        } else {
            let current = ctx.store.load_snapshot(&edge.successor)?;
            let predecessor = ctx.store.load_snapshot(&edge.predecessor)?;
            let delta = diff(&current, &predecessor);
            ctx.store.write_delta(edge, &delta)?;
            outcome.computed += 1;
        }

        index.record(edge);
    }

    ctx.store.write_lineage_index(&index)?;

    output::print(
        format!(
            "{} edges ({} new deltas, {} cached)",
            outcome.edges, outcome.computed, outcome.cached
        ),
        ctx.verbosity,
    );
    Ok(outcome)
}
