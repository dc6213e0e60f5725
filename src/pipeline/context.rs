//! pipeline::context
//!
//! Shared state for one pipeline run.
//!
//! # Design
//!
//! All stage inputs travel through one explicit context object: the manifest
//! source handle, the artifact store, the configured walk root, and the
//! output verbosity. Stages receive the context immutably; the store owns
//! all mutation.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::types::VersionId;
use crate::manifest::{HttpManifestSource, ManifestSource};
use crate::store::{ArtifactStore, StoreError};
use crate::ui::Verbosity;

/// Shared state for one pipeline run.
pub struct PipelineContext {
    /// Remote manifest service handle.
    pub source: Arc<dyn ManifestSource>,
    /// On-disk artifact cache.
    pub store: ArtifactStore,
    /// Terminal root of the lineage walk.
    pub root: VersionId,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl PipelineContext {
    /// Build a context from configuration, using the HTTP manifest source.
    pub fn from_config(config: &Config, verbosity: Verbosity) -> Result<Self, StoreError> {
        Ok(Self {
            source: Arc::new(HttpManifestSource::new(config.sources.clone())),
            store: ArtifactStore::open(config.cache_root())?,
            root: config.root_version(),
            verbosity,
        })
    }

    /// Build a context over an explicit source and store (tests).
    pub fn new(
        source: Arc<dyn ManifestSource>,
        store: ArtifactStore,
        root: VersionId,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            source,
            store,
            root,
            verbosity,
        }
    }
}
