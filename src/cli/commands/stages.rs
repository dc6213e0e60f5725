//! cli::commands::stages
//!
//! Handlers for the pipeline stage commands.
//!
//! # Example
//!
//! ```bash
//! # Full run
//! langtrail generate
//!
//! # Resume only the diff stage against an existing cache
//! langtrail diff --cache-dir ./cache
//! ```

use anyhow::Result;

use crate::cli::Context;
use crate::pipeline::{self, PipelineContext};

/// Run the full pipeline.
pub fn generate(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;
    rt.block_on(pipeline::run(&pipeline_ctx))
}

/// Run only the archive fetch stage.
pub fn fetch(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;
    rt.block_on(async {
        let manifest = pipeline_ctx.source.manifest().await?;
        pipeline::fetch::fetch_archives(&pipeline_ctx, &manifest).await?;
        Ok(())
    })
}

/// Run only the snapshot extraction stage.
pub fn extract(ctx: &Context) -> Result<()> {
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;
    pipeline::extract::extract_snapshots(&pipeline_ctx)?;
    Ok(())
}

/// Run only the lineage diff stage.
pub fn diff(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;
    rt.block_on(async {
        let manifest = pipeline_ctx.source.manifest().await?;
        pipeline::diff::build_deltas(&pipeline_ctx, &manifest).await?;
        Ok(())
    })
}

/// Run only the translation-assets stage.
pub fn assets(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;
    rt.block_on(async {
        let manifest = pipeline_ctx.source.manifest().await?;
        pipeline::assets::collect_translations(&pipeline_ctx, &manifest).await?;
        Ok(())
    })
}
