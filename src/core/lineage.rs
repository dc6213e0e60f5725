//! core::lineage
//!
//! Predecessor-chain walk with manual corrections.
//!
//! # Design
//!
//! The external manifest declares, for each version, an ordered list of
//! predecessors. The walk starts at the newest version, follows the first
//! declared predecessor, and stops at a fixed root version. Two pieces of
//! hand-maintained data patch the declared graph:
//!
//! - [`PREDECESSOR_OVERRIDES`]: corrections for known-broken predecessor
//!   links (a renamed pre-release trailer build, and two versions that
//!   historically share a mislabeled predecessor).
//! - [`SUPPLEMENTARY_EDGES`]: lineage relationships that exist historically
//!   but never appear in the declared predecessor chain, such as april-fools
//!   variants and combat-test branches. One successor may declare several
//!   predecessors here, producing several edges that share a successor.
//!
//! Both tables are compile-time constants so every run applies them
//! identically.
//!
//! # Failure
//!
//! A failed detail fetch, a version without predecessors, or a repeated
//! version id (which would loop forever) aborts the walk. Artifacts already
//! persisted by earlier stages stay valid for the next run.

use std::collections::BTreeSet;
use thiserror::Error;

use super::types::{LineageEdge, TypeError, VersionId};
use crate::manifest::{ManifestError, ManifestSource};

/// Terminal root of the primary predecessor chain.
pub const ROOT_VERSION: &str = "b1.0";

/// Corrections for known-broken declared predecessors.
///
/// Applied after every predecessor lookup: if the declared predecessor
/// matches the left column, the right column is used instead.
pub const PREDECESSOR_OVERRIDES: &[(&str, &str)] = &[
    // The trailer build was renamed after release; its declared id never
    // shipped a client.
    ("b1.6-pre-trailer", "b1.5_01"),
    // Mislabeled predecessor shared by two early beta builds.
    ("b1.3-1731", "b1.2_02"),
];

/// Manually declared edges missing from the declared predecessor chain.
///
/// Each entry is `(successor, predecessors)`. Variant releases descend from
/// the mainline build they forked off; the one multi-predecessor entry
/// records a variant cut from both a release and the snapshot that followed
/// it.
pub const SUPPLEMENTARY_EDGES: &[(&str, &[&str])] = &[
    ("1.RV-Pre1", &["16w07b"]),
    ("3D Shareware v1.34", &["19w13b"]),
    ("20w14infinite", &["20w13b"]),
    ("1.14.3 - Combat Test", &["1.14.3"]),
    ("2.0", &["1.5.1", "13w16a"]),
];

/// Errors from the lineage walk.
#[derive(Debug, Error)]
pub enum LineageError {
    /// The per-version detail fetch failed; the walk cannot continue.
    #[error("lineage walk stopped at {version}: {source}")]
    DetailFetch {
        version: VersionId,
        #[source]
        source: ManifestError,
    },

    /// A version declares no predecessor before the root was reached.
    #[error("version {0} declares no predecessor")]
    MissingPredecessor(VersionId),

    /// A declared predecessor is not a usable version id.
    #[error("version {version} declares a malformed predecessor")]
    MalformedPredecessor {
        version: VersionId,
        #[source]
        source: TypeError,
    },

    /// The declared chain revisited a version; following it would never
    /// terminate.
    #[error("lineage cycle detected at {0}")]
    Cycle(VersionId),
}

/// Map a declared predecessor through the override table.
pub fn apply_override(declared: &VersionId) -> VersionId {
    for (broken, corrected) in PREDECESSOR_OVERRIDES {
        if declared.as_str() == *broken {
            // Override targets are static and known-valid.
            return VersionId::new(*corrected).unwrap();
        }
    }
    declared.clone()
}

/// Materialize the supplementary edge table.
pub fn supplementary_edges() -> Vec<LineageEdge> {
    SUPPLEMENTARY_EDGES
        .iter()
        .flat_map(|(successor, predecessors)| {
            predecessors.iter().map(|predecessor| {
                LineageEdge::new(
                    VersionId::new(*successor).unwrap(),
                    VersionId::new(*predecessor).unwrap(),
                )
            })
        })
        .collect()
}

/// Walk the predecessor chain from `newest` down to `root`.
///
/// Returns the primary-chain edges in walk order, followed by the
/// supplementary edges in table order. The walk itself emits exactly one
/// edge per step; supplementary edges may share a successor.
pub async fn walk(
    source: &dyn ManifestSource,
    newest: &VersionId,
    root: &VersionId,
) -> Result<Vec<LineageEdge>, LineageError> {
    let mut edges = Vec::new();
    let mut seen: BTreeSet<VersionId> = BTreeSet::new();
    let mut current = newest.clone();

    while current != *root {
        if !seen.insert(current.clone()) {
            return Err(LineageError::Cycle(current));
        }

        let detail = source
            .version_detail(&current)
            .await
            .map_err(|source| LineageError::DetailFetch {
                version: current.clone(),
                source,
            })?;

        let declared = detail
            .previous
            .first()
            .ok_or_else(|| LineageError::MissingPredecessor(current.clone()))?;

        let declared =
            VersionId::new(declared.clone()).map_err(|source| LineageError::MalformedPredecessor {
                version: current.clone(),
                source,
            })?;

        let predecessor = apply_override(&declared);

        edges.push(LineageEdge::new(current.clone(), predecessor.clone()));
        current = predecessor;
    }

    edges.extend(supplementary_edges());
    Ok(edges)
}
