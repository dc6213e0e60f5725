//! pipeline::fetch
//!
//! Stage 1: download client archives.
//!
//! # Behavior
//!
//! For every manifest version, newest first:
//! - versions whose snapshot is already extracted are skipped outright
//! - `old_alpha` versions never shipped a usable client and are skipped
//! - versions whose archive is already cached are skipped
//! - versions without a client download are noted and skipped
//!
//! A failed download is fatal unless the version's snapshot already exists
//! (the archive was only needed to produce it).

use anyhow::Result;

use super::context::PipelineContext;
use crate::core::types::VersionId;
use crate::manifest::VersionManifest;
use crate::ui::output;

/// Counters reported by the fetch stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Archives downloaded this run.
    pub downloaded: usize,
    /// Versions skipped because an artifact already existed.
    pub skipped: usize,
    /// Versions without a client download.
    pub no_client: usize,
}

/// Download the client archive for every fetchable manifest version.
pub async fn fetch_archives(
    ctx: &PipelineContext,
    manifest: &VersionManifest,
) -> Result<FetchOutcome> {
    let mut outcome = FetchOutcome::default();

    output::print("Downloading client archives...", ctx.verbosity);

    for descriptor in &manifest.versions {
        let id = match VersionId::new(descriptor.version_id()) {
            Ok(id) => id,
            Err(err) => {
                output::warn(format!("skipping manifest entry: {err}"), ctx.verbosity);
                continue;
            }
        };

        if ctx.store.has_snapshot(&id) || descriptor.is_old_alpha() || ctx.store.has_archive(&id)
        {
            outcome.skipped += 1;
            continue;
        }

        match fetch_one(ctx, &id).await {
            Ok(true) => {
                output::print(&id, ctx.verbosity);
                outcome.downloaded += 1;
            }
            Ok(false) => outcome.no_client += 1,
            Err(err) => {
                // The archive only exists to produce the snapshot; if an
                // earlier run already extracted it, the failure is moot.
                if ctx.store.has_snapshot(&id) {
                    outcome.skipped += 1;
                    continue;
                }
                return Err(err);
            }
        }
    }

    output::debug(
        format!(
            "fetch: {} downloaded, {} skipped, {} without client",
            outcome.downloaded, outcome.skipped, outcome.no_client
        ),
        ctx.verbosity,
    );
    Ok(outcome)
}

/// Fetch one version's archive; `Ok(false)` means no client download exists.
async fn fetch_one(ctx: &PipelineContext, id: &VersionId) -> Result<bool> {
    let detail = ctx.source.version_detail(id).await?;

    let Some(client) = detail.client_download() else {
        return Ok(false);
    };

    let bytes = ctx.source.download(&client.url).await?;
    ctx.store.write_archive(id, &bytes)?;
    Ok(true)
}
