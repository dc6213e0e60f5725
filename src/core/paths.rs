//! core::paths
//!
//! Centralized routing for cache storage locations.
//!
//! # Storage Layout
//!
//! All artifacts live under one cache root:
//! - `archives/<id>.jar` - downloaded client archives
//! - `snapshots/<id>.json` - one localization snapshot per version
//! - `deltas/<successor>#<predecessor>.json` - one delta per lineage edge
//! - `translations/<locator>/<lang>.json` - original translation files
//! - `lineage.json` - the reverse lineage index
//! - `assets.json` - version id -> asset-bundle locator
//! - `pack.mcmeta` - the newest version's language manifest
//!
//! No code outside this module may compute artifact paths by hand.
//!
//! # Example
//!
//! ```
//! use langtrail::core::paths::CachePaths;
//! use langtrail::core::types::VersionId;
//! use std::path::PathBuf;
//!
//! let paths = CachePaths::new(PathBuf::from("/cache"));
//! let id = VersionId::new("b1.0").unwrap();
//! assert_eq!(
//!     paths.snapshot(&id),
//!     PathBuf::from("/cache/snapshots/b1.0.json")
//! );
//! ```

use std::path::{Path, PathBuf};

use super::types::{LineageEdge, VersionId};

/// Centralized path routing for the artifact cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    /// Root directory all artifacts live under.
    root: PathBuf,
}

impl CachePaths {
    /// Create path routing rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The cache root itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding downloaded client archives.
    pub fn archives_dir(&self) -> PathBuf {
        self.root.join("archives")
    }

    /// Path of one version's client archive.
    pub fn archive(&self, id: &VersionId) -> PathBuf {
        self.archives_dir().join(format!("{id}.jar"))
    }

    /// Directory holding extracted snapshots.
    pub fn snapshots_dir(&self) -> PathBuf {
        self.root.join("snapshots")
    }

    /// Path of one version's snapshot.
    pub fn snapshot(&self, id: &VersionId) -> PathBuf {
        self.snapshots_dir().join(format!("{id}.json"))
    }

    /// Directory holding per-edge deltas.
    pub fn deltas_dir(&self) -> PathBuf {
        self.root.join("deltas")
    }

    /// Path of one edge's delta, named `<successor>#<predecessor>.json`.
    pub fn delta(&self, edge: &LineageEdge) -> PathBuf {
        self.deltas_dir().join(format!("{}.json", edge.file_stem()))
    }

    /// Directory holding downloaded translation files, keyed by asset locator.
    pub fn translations_dir(&self, locator: &str) -> PathBuf {
        self.root.join("translations").join(locator)
    }

    /// Path of one translation file inside a locator directory.
    pub fn translation(&self, locator: &str, lang: &str) -> PathBuf {
        self.translations_dir(locator).join(format!("{lang}.json"))
    }

    /// The reverse lineage index.
    pub fn lineage_index(&self) -> PathBuf {
        self.root.join("lineage.json")
    }

    /// The translation-assets index.
    pub fn assets_index(&self) -> PathBuf {
        self.root.join("assets.json")
    }

    /// The newest version's language manifest.
    pub fn pack_meta(&self) -> PathBuf {
        self.root.join("pack.mcmeta")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> CachePaths {
        CachePaths::new(PathBuf::from("/cache"))
    }

    #[test]
    fn artifact_paths_live_under_root() {
        let id = VersionId::new("1.19.2").unwrap();
        assert_eq!(paths().archive(&id), PathBuf::from("/cache/archives/1.19.2.jar"));
        assert_eq!(
            paths().snapshot(&id),
            PathBuf::from("/cache/snapshots/1.19.2.json")
        );
        assert_eq!(paths().lineage_index(), PathBuf::from("/cache/lineage.json"));
        assert_eq!(paths().assets_index(), PathBuf::from("/cache/assets.json"));
    }

    #[test]
    fn delta_path_uses_edge_separator() {
        let edge = LineageEdge::new(
            VersionId::new("b1.1_02").unwrap(),
            VersionId::new("b1.1_01").unwrap(),
        );
        assert_eq!(
            paths().delta(&edge),
            PathBuf::from("/cache/deltas/b1.1_02#b1.1_01.json")
        );
    }

    #[test]
    fn translation_path_nests_locator() {
        assert_eq!(
            paths().translation("1.19/abcdef", "de_de"),
            PathBuf::from("/cache/translations/1.19/abcdef/de_de.json")
        );
    }
}
