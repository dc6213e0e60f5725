//! pipeline
//!
//! Orchestrates the run lifecycle: Fetch -> Extract -> Diff -> Assets.
//!
//! # Architecture
//!
//! Every stage is an async function taking the shared [`PipelineContext`];
//! stages run strictly in sequence and each external call is awaited to
//! completion before the next (no fan-out, no cancellation). Each stage is
//! independently runnable from the CLI, and each skips work whose artifact
//! already exists, so an aborted run resumes where it stopped.
//!
//! 1. **Fetch**: download the client archive for every manifest version
//! 2. **Extract**: pull the localization snapshot out of each archive
//! 3. **Diff**: walk the lineage, compute and persist per-edge deltas,
//!    rebuild the reverse index
//! 4. **Assets**: resolve asset indexes and collect original translations
//!
//! # Failure
//!
//! Manifest retrieval failures are fatal for the run. Artifacts persisted
//! before the failure stay valid; the next run picks up behind them.

pub mod assets;
pub mod context;
pub mod diff;
pub mod extract;
pub mod fetch;

pub use context::PipelineContext;

use anyhow::Result;

/// Run all four stages in order.
pub async fn run(ctx: &PipelineContext) -> Result<()> {
    let manifest = ctx.source.manifest().await?;
    fetch::fetch_archives(ctx, &manifest).await?;
    extract::extract_snapshots(ctx)?;
    diff::build_deltas(ctx, &manifest).await?;
    assets::collect_translations(ctx, &manifest).await?;
    Ok(())
}
