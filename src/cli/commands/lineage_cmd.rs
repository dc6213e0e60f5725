//! cli::commands::lineage_cmd
//!
//! Print the lineage chain without computing diffs.
//!
//! # Example
//!
//! ```bash
//! langtrail lineage
//! # 1.19.2 -> 1.19.1
//! # 1.19.1 -> 1.19
//! # ...
//! ```

use anyhow::Result;

use crate::cli::Context;
use crate::core::lineage;
use crate::pipeline::{diff::newest_version, PipelineContext};

/// Walk the lineage and print one `successor -> predecessor` line per edge.
pub fn lineage(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pipeline_ctx = PipelineContext::from_config(&ctx.config, ctx.verbosity)?;

    rt.block_on(async {
        let manifest = pipeline_ctx.source.manifest().await?;
        let newest = newest_version(&manifest)?;
        let edges =
            lineage::walk(pipeline_ctx.source.as_ref(), &newest, &pipeline_ctx.root).await?;

        for edge in edges {
            println!("{edge}");
        }
        Ok(())
    })
}
