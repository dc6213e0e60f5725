//! pipeline::assets
//!
//! Stage 4: collect original translation files per version.
//!
//! # Behavior
//!
//! The supported language list comes from the newest version's
//! `pack.mcmeta`, fetched through its asset index. Then, for every
//! release/snapshot version:
//!
//! - a version package without an asset index (or answering with an HTML
//!   error page) is skipped
//! - a regular asset index maps the version to locator `<id>/<sha1>` and
//!   every language file downloads from the resource host, probing the JSON
//!   path, the lowercase `.lang` path, the uppercase-region `.lang` path,
//!   and the root `lang/` path, in that order
//! - the special `pre-1.6` index maps to locator `pre-1.6/<version>` and
//!   languages are extracted from the cached client archive instead
//!
//! A locator directory that already exists is skipped wholesale. The
//! translation-assets index is rewritten at the end of the stage.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

use serde::Deserialize;

use super::context::PipelineContext;
use crate::archive::ClientArchive;
use crate::core::snapshot::Snapshot;
use crate::core::types::VersionId;
use crate::manifest::{AssetIndexRef, AssetObject, ManifestError, VersionManifest};
use crate::ui::output;

/// Counters reported by the assets stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssetsOutcome {
    /// Locator directories populated this run.
    pub collected: usize,
    /// Versions skipped (already collected, no index, or unreadable package).
    pub skipped: usize,
    /// Versions recorded in the assets index.
    pub indexed: usize,
}

/// Wire shape of `pack.mcmeta`: only the language table matters here.
#[derive(Debug, Deserialize)]
struct PackMeta {
    language: BTreeMap<String, serde_json::Value>,
}

/// Parse the supported language codes out of `pack.mcmeta` bytes.
pub fn parse_language_list(bytes: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| anyhow!("pack.mcmeta is not UTF-8: {e}"))?
        .trim();
    let meta: PackMeta =
        serde_json::from_str(text).map_err(|e| anyhow!("malformed pack.mcmeta: {e}"))?;
    Ok(meta.language.into_keys().collect())
}

/// Uppercase the region part of a locale code (`pt_br` -> `pt_BR`).
///
/// The oldest asset layouts and in-jar language files use uppercase region
/// codes; codes without a region pass through unchanged.
pub fn legacy_locale_code(code: &str) -> String {
    match code.split_once('_') {
        Some((lang, region)) => format!("{lang}_{}", region.to_uppercase()),
        None => code.to_string(),
    }
}

/// Collect original translation files for every asset-era version.
pub async fn collect_translations(
    ctx: &PipelineContext,
    manifest: &VersionManifest,
) -> Result<AssetsOutcome> {
    let languages = fetch_language_list(ctx, manifest).await?;
    output::print(
        format!("Collecting translations for {} languages...", languages.len()),
        ctx.verbosity,
    );

    let mut outcome = AssetsOutcome::default();
    let mut assets_index: BTreeMap<VersionId, String> = BTreeMap::new();

    for descriptor in &manifest.versions {
        if !descriptor.has_asset_era() {
            continue;
        }
        let Ok(launcher_id) = VersionId::new(descriptor.id.clone()) else {
            outcome.skipped += 1;
            continue;
        };

        let package = match ctx.source.version_package(&descriptor.url).await {
            Ok(package) => package,
            // Some historical packages answer with an HTML error page.
            Err(ManifestError::Malformed { url, .. }) => {
                output::warn(format!("unreadable version package: {url}"), ctx.verbosity);
                outcome.skipped += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let Some(index_ref) = package.asset_index else {
            outcome.skipped += 1;
            continue;
        };

        if index_ref.is_pre_assets() {
            collect_from_archive(
                ctx,
                descriptor.version_id(),
                &launcher_id,
                &languages,
                &mut assets_index,
                &mut outcome,
            )?;
        } else {
            collect_from_resources(
                ctx,
                &index_ref,
                &launcher_id,
                &languages,
                &mut assets_index,
                &mut outcome,
            )
            .await?;
        }
    }

    outcome.indexed = assets_index.len();
    ctx.store.write_assets_index(&assets_index)?;
    Ok(outcome)
}

/// Resolve the newest version's asset index and read its `pack.mcmeta`.
async fn fetch_language_list(
    ctx: &PipelineContext,
    manifest: &VersionManifest,
) -> Result<Vec<String>> {
    let newest = manifest
        .versions
        .first()
        .ok_or_else(|| anyhow!("manifest lists no versions"))?;

    let package = ctx.source.version_package(&newest.url).await?;
    let index_ref = package
        .asset_index
        .ok_or_else(|| anyhow!("newest version {} has no asset index", newest.id))?;
    let objects = ctx.source.asset_objects(&index_ref.url).await?;
    let meta = objects
        .get("pack.mcmeta")
        .ok_or_else(|| anyhow!("asset index {} has no pack.mcmeta", index_ref.id))?;

    let bytes = ctx
        .source
        .download(&ctx.source.resource_url(&meta.hash))
        .await?;
    ctx.store.write_pack_meta(&bytes)?;
    parse_language_list(&bytes)
}

/// Download one version's translations from the resource host.
async fn collect_from_resources(
    ctx: &PipelineContext,
    index_ref: &AssetIndexRef,
    launcher_id: &VersionId,
    languages: &[String],
    assets_index: &mut BTreeMap<VersionId, String>,
    outcome: &mut AssetsOutcome,
) -> Result<()> {
    let locator = index_ref.locator();
    assets_index.insert(launcher_id.clone(), locator.clone());

    if ctx.store.has_translations(&locator) {
        outcome.skipped += 1;
        return Ok(());
    }

    output::print(
        format!("Downloading translations into {locator}"),
        ctx.verbosity,
    );
    let objects = ctx.source.asset_objects(&index_ref.url).await?;

    for lang in languages {
        download_language(ctx, &objects, &locator, lang).await?;
    }

    outcome.collected += 1;
    Ok(())
}

/// Probe the asset object table for one language and download the first hit.
async fn download_language(
    ctx: &PipelineContext,
    objects: &BTreeMap<String, AssetObject>,
    locator: &str,
    lang: &str,
) -> Result<bool> {
    // Modern JSON files pass through untouched.
    if let Some(object) = objects.get(&format!("minecraft/lang/{lang}.json")) {
        let bytes = ctx
            .source
            .download(&ctx.source.resource_url(&object.hash))
            .await?;
        ctx.store.write_translation_raw(locator, lang, &bytes)?;
        return Ok(true);
    }

    // Legacy text files convert to JSON snapshots on the way in.
    let legacy = legacy_locale_code(lang);
    let candidates = [
        format!("minecraft/lang/{lang}.lang"),
        format!("minecraft/lang/{legacy}.lang"),
        format!("lang/{legacy}.lang"),
    ];
    for path in candidates {
        if let Some(object) = objects.get(&path) {
            let bytes = ctx
                .source
                .download(&ctx.source.resource_url(&object.hash))
                .await?;
            let snapshot = Snapshot::from_legacy_text(&String::from_utf8_lossy(&bytes));
            ctx.store.write_translation(locator, lang, &snapshot)?;
            return Ok(true);
        }
    }

    Ok(false)
}

/// Extract one pre-asset-era version's translations from its cached archive.
fn collect_from_archive(
    ctx: &PipelineContext,
    archive_id: &str,
    launcher_id: &VersionId,
    languages: &[String],
    assets_index: &mut BTreeMap<VersionId, String>,
    outcome: &mut AssetsOutcome,
) -> Result<()> {
    let Ok(archive_id) = VersionId::new(archive_id) else {
        outcome.skipped += 1;
        return Ok(());
    };
    let locator = format!("{}/{}", AssetIndexRef::PRE_ASSETS_ID, archive_id);
    assets_index.insert(launcher_id.clone(), locator.clone());

    if ctx.store.has_translations(&locator) {
        outcome.skipped += 1;
        return Ok(());
    }
    if !ctx.store.has_archive(&archive_id) {
        output::warn(
            format!("{archive_id}: no cached archive for translation extraction"),
            ctx.verbosity,
        );
        outcome.skipped += 1;
        return Ok(());
    }

    output::print(
        format!("Extracting translations into {locator}"),
        ctx.verbosity,
    );
    let mut archive = ClientArchive::open(&ctx.store.archive_path(&archive_id))?;
    for lang in languages {
        let entry = format!("lang/{}.lang", legacy_locale_code(lang));
        if let Some(snapshot) = archive.read_legacy_snapshot(&entry)? {
            ctx.store.write_translation(&locator, lang, &snapshot)?;
        }
    }

    outcome.collected += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_locale_code_uppercases_region() {
        assert_eq!(legacy_locale_code("pt_br"), "pt_BR");
        assert_eq!(legacy_locale_code("en_us"), "en_US");
        assert_eq!(legacy_locale_code("sr_cs"), "sr_CS");
    }

    #[test]
    fn legacy_locale_code_passes_regionless_codes() {
        assert_eq!(legacy_locale_code("eo"), "eo");
    }

    #[test]
    fn language_list_parses_pack_meta() {
        let meta = br#"{
            "pack": {"pack_format": 9},
            "language": {
                "en_us": {"name": "English", "region": "US"},
                "de_de": {"name": "Deutsch", "region": "DE"}
            }
        }"#;
        let mut languages = parse_language_list(meta).unwrap();
        languages.sort();
        assert_eq!(languages, vec!["de_de", "en_us"]);
    }

    #[test]
    fn language_list_tolerates_surrounding_whitespace() {
        let meta = b"\n  {\"language\": {\"en_us\": {}}}  \n";
        assert_eq!(parse_language_list(meta).unwrap(), vec!["en_us"]);
    }

    #[test]
    fn language_list_rejects_garbage() {
        assert!(parse_language_list(b"<html>").is_err());
    }
}
