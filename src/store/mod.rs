//! store
//!
//! On-disk artifact cache.
//!
//! # Design
//!
//! One store per cache root, routed through [`CachePaths`]. The store is a
//! single-writer space: the process is single-threaded and run-to-completion,
//! so there is no locking. Idempotence comes entirely from skip-if-exists
//! checks (`has_*` probes before expensive work), not from transactions.
//!
//! All writes go to a temp file in the target directory and are renamed into
//! place, so a crashed run never leaves a torn artifact behind.
//!
//! # Example
//!
//! ```ignore
//! use langtrail::store::ArtifactStore;
//!
//! let store = ArtifactStore::open(config.cache_root())?;
//! let snapshot = store.load_snapshot(&id)?; // empty if absent
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::diff::Delta;
use crate::core::index::ReverseIndex;
use crate::core::paths::CachePaths;
use crate::core::snapshot::Snapshot;
use crate::core::types::{LineageEdge, VersionId};

/// Errors from artifact storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize artifact {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk artifact cache rooted at one directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    paths: CachePaths,
}

impl ArtifactStore {
    /// Open (and create) a store at `root`.
    pub fn open(root: PathBuf) -> Result<Self, StoreError> {
        let store = Self {
            paths: CachePaths::new(root),
        };
        for dir in [
            store.paths.root().to_path_buf(),
            store.paths.archives_dir(),
            store.paths.snapshots_dir(),
            store.paths.deltas_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(store)
    }

    /// Path routing for this store.
    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// True if a snapshot is persisted for the version.
    pub fn has_snapshot(&self, id: &VersionId) -> bool {
        self.paths.snapshot(id).exists()
    }

    /// Load a version's snapshot; absent file yields an empty snapshot.
    pub fn load_snapshot(&self, id: &VersionId) -> Result<Snapshot, StoreError> {
        let path = self.paths.snapshot(id);
        if !path.exists() {
            return Ok(Snapshot::new());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Persist a version's snapshot.
    pub fn write_snapshot(&self, id: &VersionId, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.write_json(&self.paths.snapshot(id), snapshot)
    }

    // =========================================================================
    // Deltas
    // =========================================================================

    /// True if a delta is persisted for the edge.
    ///
    /// The cache key is the literal edge, not snapshot content: a corrected
    /// snapshot after first computation is not reflected until the delta file
    /// is removed by hand.
    pub fn has_delta(&self, edge: &LineageEdge) -> bool {
        self.paths.delta(edge).exists()
    }

    /// Load a persisted delta, if any.
    pub fn load_delta(&self, edge: &LineageEdge) -> Result<Option<Delta>, StoreError> {
        let path = self.paths.delta(edge);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Persist an edge's delta.
    pub fn write_delta(&self, edge: &LineageEdge, delta: &Delta) -> Result<(), StoreError> {
        self.write_json(&self.paths.delta(edge), delta)
    }

    // =========================================================================
    // Indexes
    // =========================================================================

    /// Persist the reverse lineage index (full overwrite).
    pub fn write_lineage_index(&self, index: &ReverseIndex) -> Result<(), StoreError> {
        self.write_json(&self.paths.lineage_index(), index)
    }

    /// Persist the translation-assets index (full overwrite).
    pub fn write_assets_index(
        &self,
        index: &BTreeMap<VersionId, String>,
    ) -> Result<(), StoreError> {
        self.write_json(&self.paths.assets_index(), index)
    }

    // =========================================================================
    // Archives and translations
    // =========================================================================

    /// True if a client archive is cached for the version.
    pub fn has_archive(&self, id: &VersionId) -> bool {
        self.paths.archive(id).exists()
    }

    /// Path of a version's cached client archive.
    pub fn archive_path(&self, id: &VersionId) -> PathBuf {
        self.paths.archive(id)
    }

    /// Persist a downloaded client archive.
    pub fn write_archive(&self, id: &VersionId, bytes: &[u8]) -> Result<(), StoreError> {
        self.write_bytes(&self.paths.archive(id), bytes)
    }

    /// Iterate version ids of every cached archive, sorted.
    pub fn archive_ids(&self) -> Result<Vec<VersionId>, StoreError> {
        let dir = self.paths.archives_dir();
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Read {
            path: dir.clone(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".jar")) else {
                continue;
            };
            if let Ok(id) = VersionId::new(stem) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// True if a translation locator directory already exists.
    pub fn has_translations(&self, locator: &str) -> bool {
        self.paths.translations_dir(locator).exists()
    }

    /// Persist one translation file under its locator.
    pub fn write_translation(
        &self,
        locator: &str,
        lang: &str,
        snapshot: &Snapshot,
    ) -> Result<(), StoreError> {
        self.write_json(&self.paths.translation(locator, lang), snapshot)
    }

    /// Persist raw translation bytes (already-JSON files pass through).
    pub fn write_translation_raw(
        &self,
        locator: &str,
        lang: &str,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        self.write_bytes(&self.paths.translation(locator, lang), bytes)
    }

    /// Persist the newest version's language manifest.
    pub fn write_pack_meta(&self, bytes: &[u8]) -> Result<(), StoreError> {
        self.write_bytes(&self.paths.pack_meta(), bytes)
    }

    // =========================================================================
    // Write primitives
    // =========================================================================

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let content =
            serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        self.write_bytes(path, &content)
    }

    /// Atomic write: temp file in the target directory, then rename.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
