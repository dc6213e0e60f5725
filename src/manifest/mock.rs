//! manifest::mock
//!
//! In-memory manifest source for tests.
//!
//! # Design
//!
//! Fixtures are registered up front; every trait method answers from the
//! in-memory tables and never touches the network. Unknown keys answer
//! [`ManifestError::NotFound`], which lets tests exercise the fatal-walk
//! paths without a transport.
//!
//! # Example
//!
//! ```
//! use langtrail::core::types::VersionId;
//! use langtrail::manifest::mock::MockManifestSource;
//! use langtrail::manifest::ManifestSource;
//!
//! # tokio_test::block_on(async {
//! let mut mock = MockManifestSource::new();
//! mock.declare_chain(&["1.1", "1.0", "b1.0"]);
//!
//! let detail = mock
//!     .version_detail(&VersionId::new("1.1").unwrap())
//!     .await
//!     .unwrap();
//! assert_eq!(detail.previous, vec!["1.0"]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::traits::{
    AssetObject, ManifestError, ManifestSource, VersionDescriptor, VersionDetail, VersionManifest,
    VersionPackage,
};
use crate::core::types::VersionId;

/// In-memory manifest source.
#[derive(Debug, Default)]
pub struct MockManifestSource {
    versions: Vec<VersionDescriptor>,
    details: BTreeMap<String, VersionDetail>,
    packages: BTreeMap<String, VersionPackage>,
    asset_tables: BTreeMap<String, BTreeMap<String, AssetObject>>,
    blobs: BTreeMap<String, Vec<u8>>,
    /// URLs requested through `download`, for assertions.
    downloads_seen: Mutex<Vec<String>>,
}

impl MockManifestSource {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest listing entry.
    pub fn add_version(&mut self, descriptor: VersionDescriptor) {
        self.versions.push(descriptor);
    }

    /// Register a per-version detail document.
    pub fn add_detail(&mut self, id: &str, detail: VersionDetail) {
        self.details.insert(id.to_string(), detail);
    }

    /// Register a version package behind a descriptor URL.
    pub fn add_package(&mut self, url: &str, package: VersionPackage) {
        self.packages.insert(url.to_string(), package);
    }

    /// Register an asset index object table.
    pub fn add_asset_table(&mut self, url: &str, objects: BTreeMap<String, AssetObject>) {
        self.asset_tables.insert(url.to_string(), objects);
    }

    /// Register downloadable bytes.
    pub fn add_blob(&mut self, url: &str, bytes: impl Into<Vec<u8>>) {
        self.blobs.insert(url.to_string(), bytes.into());
    }

    /// Declare a plain predecessor chain, newest first.
    ///
    /// Registers a listing entry for the newest id and a detail document
    /// for every link except the last (the chain root).
    pub fn declare_chain(&mut self, chain: &[&str]) {
        if let Some(newest) = chain.first() {
            self.add_version(VersionDescriptor {
                id: newest.to_string(),
                omni_id: None,
                kind: "release".to_string(),
                url: format!("https://mock.invalid/package/{newest}.json"),
            });
        }
        for pair in chain.windows(2) {
            self.add_detail(
                pair[0],
                VersionDetail {
                    previous: vec![pair[1].to_string()],
                    downloads: None,
                },
            );
        }
    }

    /// URLs requested through `download`, in request order.
    pub fn downloads_seen(&self) -> Vec<String> {
        self.downloads_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ManifestSource for MockManifestSource {
    async fn manifest(&self) -> Result<VersionManifest, ManifestError> {
        Ok(VersionManifest {
            versions: self.versions.clone(),
        })
    }

    async fn version_detail(&self, id: &VersionId) -> Result<VersionDetail, ManifestError> {
        self.details
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ManifestError::NotFound(format!("detail for {id}")))
    }

    async fn version_package(&self, url: &str) -> Result<VersionPackage, ManifestError> {
        self.packages
            .get(url)
            .cloned()
            .ok_or_else(|| ManifestError::NotFound(url.to_string()))
    }

    async fn asset_objects(
        &self,
        url: &str,
    ) -> Result<BTreeMap<String, AssetObject>, ManifestError> {
        self.asset_tables
            .get(url)
            .cloned()
            .ok_or_else(|| ManifestError::NotFound(url.to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ManifestError> {
        self.downloads_seen.lock().unwrap().push(url.to_string());
        self.blobs
            .get(url)
            .cloned()
            .ok_or_else(|| ManifestError::NotFound(url.to_string()))
    }

    fn resource_url(&self, hash: &str) -> String {
        format!("https://mock.invalid/resources/{hash}")
    }
}
